//! Link data model for print-job PDF output.
//!
//! A producer that drives the printing pipeline knows *what* should become
//! a hyperlink but not *where* it lands on the rendered page. This crate
//! holds the records that carry that knowledge between the two phases:
//!
//! - [`LinkRecord`]: one hyperlink or internal jump target on one page.
//! - [`PageLinks`]: the ordered records for a single page plus its
//!   rendered dimensions.
//! - [`JobLinks`]: all pages of a job plus the test-mode flag.
//!
//! Records are either *text-seek* (find the Nth occurrence of a string on
//! the page) or *location* links (an explicit rectangle); the distinction
//! is a tagged variant, so a record can never be both or neither.

pub mod link;
pub mod table;

pub use link::{Anchor, Destination, LinkRecord};
pub use table::{JobLinks, PageLinks};
