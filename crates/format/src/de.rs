//! Deserialization of a job link table from the persistence format.

use crate::schema::*;
use crate::section::SectionStore;
use presslink_registry::{Anchor, Destination, JobLinks, LinkRecord};
use presslink_types::{LinkRect, PageSize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

/// Rebuilds a table from a parsed section store.
///
/// Lenient on purpose: the file may come from another build of the
/// producer or have been truncated mid-job. A declared page count of zero
/// or less yields an empty table; a page section with a non-positive link
/// count yields an empty page; a single link missing a required field
/// (no destination, or an incomplete rectangle) is dropped alone.
pub fn deserialize(store: &SectionStore) -> JobLinks {
    let mut table = JobLinks::new();
    let Some(job) = store.keys(SECTION_JOB) else {
        return table;
    };

    if let Some(flag) = job.get(KEY_TEST_PAGE) {
        table.set_test_mode(lenient_int(flag) != 0);
    }

    let page_count = job.get(KEY_PAGE_COUNT).map_or(0, |v| lenient_int(v));
    if page_count <= 0 {
        return table;
    }
    table.ensure_page(page_count as u32);

    for number in 1..=page_count as u32 {
        read_page(store, number, &mut table);
    }
    table
}

/// Convenience wrapper: raw file bytes straight to a table.
pub fn parse_bytes(bytes: &[u8]) -> JobLinks {
    deserialize(&SectionStore::from_bytes(bytes))
}

fn read_page(store: &SectionStore, number: u32, table: &mut JobLinks) {
    let Some(data) = store.keys(&page_section(number)) else {
        return;
    };
    let Some(count) = data.get(KEY_LINK_COUNT) else {
        return;
    };
    let link_count = lenient_int(count);
    if link_count < 1 {
        log::debug!("page {number} declares link count {link_count}, keeping it empty");
    } else {
        for num in 1..=link_count as u32 {
            match read_link(data, num) {
                Some(record) => table.add_record(number, record),
                None => log::debug!("dropping malformed link {num} on page {number}"),
            }
        }
    }

    let width = data.get(KEY_WIDTH).map_or(0, |v| lenient_int(v));
    let height = data.get(KEY_HEIGHT).map_or(0, |v| lenient_int(v));
    if width != 0 || height != 0 {
        table.set_page_size(number, PageSize::new(width, height));
    }
}

fn read_link(data: &BTreeMap<String, String>, num: u32) -> Option<LinkRecord> {
    let destination = if let Some(page) = data.get(&numbered(KEY_PAGE, num)) {
        // Internal link: the destination page is required and 1-based.
        let page = NonZeroU32::new(lenient_int(page).max(0) as u32)?;
        Destination::Internal {
            page,
            offset_x: int_field(data, KEY_OFFSET_X, num),
            offset_y: int_field(data, KEY_OFFSET_Y, num),
        }
    } else {
        let url = data.get(&numbered(KEY_URL, num))?;
        Destination::External { url: url.clone() }
    };

    let title = data.get(&numbered(KEY_TITLE, num)).cloned();

    let anchor = if let Some(text) = data.get(&numbered(KEY_TEXT, num)) {
        let declared = int_field(data, KEY_REPEAT, num);
        Anchor::Text {
            text: text.clone(),
            repeat: if declared > 0 { declared as u32 } else { 1 },
        }
    } else {
        // Location link: all four bounds are required.
        Anchor::Area(LinkRect::new(
            lenient_int(data.get(&numbered(KEY_LEFT, num))?),
            lenient_int(data.get(&numbered(KEY_RIGHT, num))?),
            lenient_int(data.get(&numbered(KEY_TOP, num))?),
            lenient_int(data.get(&numbered(KEY_BOTTOM, num))?),
        ))
    };

    Some(LinkRecord {
        anchor,
        destination,
        title,
    })
}

fn int_field(data: &BTreeMap<String, String>, key: &str, num: u32) -> i32 {
    data.get(&numbered(key, num)).map_or(0, |v| lenient_int(v))
}
