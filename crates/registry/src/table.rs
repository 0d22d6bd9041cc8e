use crate::link::LinkRecord;
use presslink_types::{LinkRect, PageSize};
use std::num::NonZeroU32;

/// The ordered link records for one page, plus that page's rendered
/// dimensions once they are known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub links: Vec<LinkRecord>,
    pub size: PageSize,
}

/// Shared default returned for pages the table has no data for.
static EMPTY_PAGE: PageLinks = PageLinks {
    links: Vec::new(),
    size: PageSize::zero(),
};

impl PageLinks {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether any record on this page still needs text resolution.
    ///
    /// The render collaborator uses this to decide if a test pass is
    /// required before real links can be emitted.
    pub fn has_text_link(&self) -> bool {
        self.links.iter().any(|link| !link.is_location())
    }
}

/// All link data for one print job.
///
/// Pages are 1-based and implicitly indexed by position; links may be
/// added out of order, and gaps are represented as empty pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobLinks {
    pages: Vec<PageLinks>,
    test_mode: bool,
}

impl JobLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages the table has data for (including empty gaps).
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    pub fn has_data(&self) -> bool {
        !self.pages.is_empty()
    }

    /// Whether the render collaborator should report matched-text
    /// rectangles instead of emitting real links.
    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn set_test_mode(&mut self, test_mode: bool) {
        self.test_mode = test_mode;
    }

    /// Grows the page sequence with empty pages until `page` exists.
    pub fn ensure_page(&mut self, page: u32) {
        while (self.pages.len() as u32) < page {
            self.pages.push(PageLinks::default());
        }
    }

    /// The link data for a 1-based page number.
    ///
    /// Out-of-range pages yield a shared empty set; querying an
    /// unpopulated page is never an error.
    pub fn page_data(&self, page: u32) -> &PageLinks {
        if page < 1 || page > self.pages.len() as u32 {
            return &EMPTY_PAGE;
        }
        &self.pages[(page - 1) as usize]
    }

    /// Appends a record to `page`, growing the table as needed.
    pub fn add_record(&mut self, page: u32, record: LinkRecord) {
        let page = page.max(1);
        self.ensure_page(page);
        self.pages[(page - 1) as usize].links.push(record);
    }

    /// Adds an external text-seek link to `page`.
    pub fn add_text_link(
        &mut self,
        url: impl Into<String>,
        text: impl Into<String>,
        page: u32,
        repeat: u32,
    ) {
        self.add_record(page, LinkRecord::text_link(url, text, repeat));
    }

    /// Adds an external link with a known rectangle to `page`.
    pub fn add_location_link(&mut self, url: impl Into<String>, rect: LinkRect, page: u32) {
        self.add_record(page, LinkRecord::location_link(url, rect));
    }

    /// Adds an internal jump from `rect` on `page` to `dest_page`.
    pub fn add_internal_link(
        &mut self,
        rect: LinkRect,
        page: u32,
        dest_page: NonZeroU32,
        offset_x: i32,
        offset_y: i32,
    ) {
        self.add_record(
            page,
            LinkRecord::internal_link(rect, dest_page, offset_x, offset_y),
        );
    }

    /// Records the rendered size of `page`. Out-of-range pages are
    /// ignored, matching the read side's leniency.
    pub fn set_page_size(&mut self, page: u32, size: PageSize) {
        if page < 1 || page > self.pages.len() as u32 {
            return;
        }
        self.pages[(page - 1) as usize].size = size;
    }

    /// Iterates pages in order with their 1-based page numbers.
    pub fn pages(&self) -> impl Iterator<Item = (u32, &PageLinks)> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| (i as u32 + 1, page))
    }

    /// Drops all pages and resets the test flag.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.test_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_page_grows_with_empty_pages() {
        let mut table = JobLinks::new();
        table.ensure_page(3);
        assert_eq!(table.page_count(), 3);
        assert!(table.page_data(1).is_empty());
        assert!(table.page_data(3).is_empty());
    }

    #[test]
    fn test_page_data_in_range_is_not_the_default() {
        let mut table = JobLinks::new();
        table.add_text_link("https://example.org", "here", 2, 1);
        // Page 2 exists and holds the record; page 1 exists as a gap.
        assert_eq!(table.page_count(), 2);
        assert_eq!(table.page_data(2).len(), 1);
        assert!(table.page_data(1).is_empty());
    }

    #[test]
    fn test_page_data_out_of_range_is_empty() {
        let table = JobLinks::new();
        assert!(table.page_data(0).is_empty());
        assert!(table.page_data(7).is_empty());
    }

    #[test]
    fn test_add_links_out_of_order() {
        let mut table = JobLinks::new();
        table.add_text_link("https://a.example", "a", 5, 1);
        table.add_location_link("https://b.example", LinkRect::new(1, 2, 3, 4), 2);
        assert_eq!(table.page_count(), 5);
        assert_eq!(table.page_data(2).len(), 1);
        assert_eq!(table.page_data(5).len(), 1);
        assert!(table.page_data(3).is_empty());
    }

    #[test]
    fn test_set_page_size_out_of_range_ignored() {
        let mut table = JobLinks::new();
        table.ensure_page(1);
        table.set_page_size(2, PageSize::new(612, 792));
        assert!(table.page_data(1).size.is_zero());

        table.set_page_size(1, PageSize::new(612, 792));
        assert_eq!(table.page_data(1).size, PageSize::new(612, 792));
    }

    #[test]
    fn test_has_text_link() {
        let mut table = JobLinks::new();
        table.add_location_link("https://example.org", LinkRect::default(), 1);
        assert!(!table.page_data(1).has_text_link());
        table.add_text_link("https://example.org", "find me", 1, 1);
        assert!(table.page_data(1).has_text_link());
    }

    #[test]
    fn test_clear_resets_test_mode() {
        let mut table = JobLinks::new();
        table.set_test_mode(true);
        table.add_text_link("https://example.org", "x", 1, 1);
        table.clear();
        assert!(!table.has_data());
        assert!(!table.test_mode());
    }

    #[test]
    fn test_pages_iteration_is_one_based() {
        let mut table = JobLinks::new();
        table.add_text_link("https://example.org", "x", 2, 1);
        let numbers: Vec<u32> = table.pages().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
