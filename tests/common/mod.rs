use presslink::{JobLinks, LinkRect, PageSize};
use std::num::NonZeroU32;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A table exercising every record shape: text-seek, external location,
/// internal jump, titles, page sizes, and a trailing gap page.
pub fn mixed_table() -> JobLinks {
    let mut table = JobLinks::new();
    table.add_text_link("https://example.org", "Click here", 1, 2);
    table.add_location_link("https://example.org/figure", LinkRect::new(72, 340, 144, 180), 1);
    table.add_internal_link(
        LinkRect::new(10, 90, 20, 35),
        2,
        NonZeroU32::new(4).unwrap(),
        0,
        640,
    );
    table.set_page_size(1, PageSize::new(612, 792));
    table.set_page_size(2, PageSize::new(612, 792));
    table.ensure_page(5);
    table
}
