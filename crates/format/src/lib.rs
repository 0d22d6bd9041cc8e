//! Persistence format for job link tables.
//!
//! The producing and consuming phases of a print job do not share memory,
//! so the link table travels as a line-oriented `[Section]` / `key=value`
//! file. The format is deliberately sparse: pages without links are not
//! written at all, and optional keys are omitted at their defaults, so
//! output size is proportional to the number of links rather than the
//! page count.
//!
//! Parsing is lenient by design. The file may have been written by an
//! older build or truncated by a crashed producer; a single link missing
//! a required field is dropped on its own, and malformed numeric values
//! fall back to defaults. [`deserialize`] therefore never fails once the
//! bytes are in memory.

pub mod de;
pub mod section;
pub mod ser;

mod schema;

pub use de::{deserialize, parse_bytes};
pub use section::SectionStore;
pub use ser::{Encoding, encode, serialize};
