//! Serialization of a job link table to the persistence format.

use crate::schema::*;
use presslink_registry::{Anchor, Destination, JobLinks, LinkRecord, PageLinks};
use std::fmt::Write;

/// Byte encoding of the serialized file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Plain UTF-8, no byte-order marker.
    #[default]
    Utf8,
    /// UTF-16LE prefixed with the 0xFF 0xFE byte-order marker, for parity
    /// with wide-character producers.
    Utf16Le,
}

/// Serializes a table to the textual format, CRLF line endings.
///
/// Output is deterministic: entries appear in table order, pages with no
/// links are omitted entirely, and optional keys are omitted at their
/// defaults. Pushing a string through [`crate::deserialize`] recovers an
/// equal table as long as no string field contains CR or LF.
pub fn serialize(table: &JobLinks) -> String {
    let mut out = String::new();
    out.push_str("[Job]\r\n");
    let _ = write!(out, "{KEY_PAGE_COUNT}={}\r\n", table.page_count());
    if table.test_mode() {
        let _ = write!(out, "{KEY_TEST_PAGE}=1\r\n");
    }
    for (number, page) in table.pages() {
        write_page(&mut out, number, page);
    }
    out
}

/// Serializes a table straight to file bytes in the requested encoding.
pub fn encode(table: &JobLinks, encoding: Encoding) -> Vec<u8> {
    let text = serialize(table);
    match encoding {
        Encoding::Utf8 => text.into_bytes(),
        Encoding::Utf16Le => {
            let mut bytes = Vec::with_capacity(2 + text.len() * 2);
            bytes.extend_from_slice(&[0xFF, 0xFE]);
            for unit in text.encode_utf16() {
                bytes.extend_from_slice(&unit.to_le_bytes());
            }
            bytes
        }
    }
}

fn write_page(out: &mut String, number: u32, page: &PageLinks) {
    if page.is_empty() {
        return;
    }
    let _ = write!(out, "[Page {number}]\r\n");
    let _ = write!(out, "{KEY_LINK_COUNT}={}\r\n", page.len());
    for (index, link) in page.links.iter().enumerate() {
        write_link(out, index as u32 + 1, link);
    }
    if page.size.width != 0 {
        let _ = write!(out, "{KEY_WIDTH}={}\r\n", page.size.width);
    }
    if page.size.height != 0 {
        let _ = write!(out, "{KEY_HEIGHT}={}\r\n", page.size.height);
    }
}

fn write_link(out: &mut String, num: u32, link: &LinkRecord) {
    match &link.destination {
        Destination::Internal {
            page,
            offset_x,
            offset_y,
        } => {
            let _ = write!(out, "{KEY_PAGE}{num}={page}\r\n");
            if *offset_x != 0 {
                let _ = write!(out, "{KEY_OFFSET_X}{num}={offset_x}\r\n");
            }
            if *offset_y != 0 {
                let _ = write!(out, "{KEY_OFFSET_Y}{num}={offset_y}\r\n");
            }
        }
        Destination::External { url } => {
            let _ = write!(out, "{KEY_URL}{num}={url}\r\n");
        }
    }
    if let Some(title) = link.title.as_deref()
        && !title.is_empty()
    {
        let _ = write!(out, "{KEY_TITLE}{num}={title}\r\n");
    }
    match &link.anchor {
        Anchor::Area(rect) => {
            let _ = write!(out, "{KEY_LEFT}{num}={}\r\n", rect.left);
            let _ = write!(out, "{KEY_RIGHT}{num}={}\r\n", rect.right);
            let _ = write!(out, "{KEY_TOP}{num}={}\r\n", rect.top);
            let _ = write!(out, "{KEY_BOTTOM}{num}={}\r\n", rect.bottom);
        }
        Anchor::Text { text, repeat } => {
            let _ = write!(out, "{KEY_TEXT}{num}={text}\r\n");
            if *repeat > 1 {
                let _ = write!(out, "{KEY_REPEAT}{num}={repeat}\r\n");
            }
        }
    }
}
