use presslink_types::LinkRect;
use std::num::NonZeroU32;

/// Where on the page a link is anchored.
///
/// Text-seek anchors are resolved by the render collaborator, which
/// locates the `repeat`-th occurrence of `text` on the rendered page.
/// Area anchors carry an explicit rectangle, known in advance or reported
/// back by a test pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Text { text: String, repeat: u32 },
    Area(LinkRect),
}

/// Where a link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A hyperlink to an external resource.
    External { url: String },
    /// A jump to a location on another page of the same document.
    ///
    /// Pages are 1-based; the non-zero page number is what makes a record
    /// internal, so the two cannot disagree.
    Internal {
        page: NonZeroU32,
        offset_x: i32,
        offset_y: i32,
    },
}

/// One hyperlink or internal jump target attached to one page.
///
/// Immutable once constructed apart from the CR/LF stripping applied to
/// the match text (the persistence format is line-oriented, so the text
/// must stay on one line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub anchor: Anchor,
    pub destination: Destination,
    /// Tooltip text, if any.
    pub title: Option<String>,
}

impl LinkRecord {
    /// An external link placed by finding `text` on the page.
    ///
    /// `repeat` selects which occurrence of the text to target and is
    /// never less than 1.
    pub fn text_link(url: impl Into<String>, text: impl Into<String>, repeat: u32) -> Self {
        Self {
            anchor: Anchor::Text {
                text: clean_match_text(text.into()),
                repeat: repeat.max(1),
            },
            destination: Destination::External { url: url.into() },
            title: None,
        }
    }

    /// An external link with an explicit target rectangle.
    pub fn location_link(url: impl Into<String>, rect: LinkRect) -> Self {
        Self {
            anchor: Anchor::Area(rect),
            destination: Destination::External { url: url.into() },
            title: None,
        }
    }

    /// An internal jump from `rect` to a location on `dest_page`.
    pub fn internal_link(rect: LinkRect, dest_page: NonZeroU32, offset_x: i32, offset_y: i32) -> Self {
        Self {
            anchor: Anchor::Area(rect),
            destination: Destination::Internal {
                page: dest_page,
                offset_x,
                offset_y,
            },
            title: None,
        }
    }

    /// Attaches tooltip text to the record.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// `true` for area-anchored records, `false` for text-seek records.
    pub fn is_location(&self) -> bool {
        matches!(self.anchor, Anchor::Area(_))
    }

    /// `true` for records that jump within the document.
    pub fn is_internal(&self) -> bool {
        matches!(self.destination, Destination::Internal { .. })
    }

    /// The URL for external records.
    pub fn url(&self) -> Option<&str> {
        match &self.destination {
            Destination::External { url } => Some(url),
            Destination::Internal { .. } => None,
        }
    }

    /// The text to seek, for text-seek records.
    pub fn match_text(&self) -> Option<&str> {
        match &self.anchor {
            Anchor::Text { text, .. } => Some(text),
            Anchor::Area(_) => None,
        }
    }

    /// The anchor rectangle, for location records.
    pub fn rect(&self) -> Option<LinkRect> {
        match &self.anchor {
            Anchor::Area(rect) => Some(*rect),
            Anchor::Text { .. } => None,
        }
    }
}

/// Match text must stay representable on one line of the persistence
/// format, so line breaks are removed outright rather than replaced.
fn clean_match_text(text: String) -> String {
    if text.contains(['\r', '\n']) {
        text.chars().filter(|c| *c != '\r' && *c != '\n').collect()
    } else {
        text
    }
}
