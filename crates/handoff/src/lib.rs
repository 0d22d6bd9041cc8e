//! Handoff protocol for print-job link tables.
//!
//! The producing phase of a print job serializes its link table to a
//! uniquely-named temp file and records `(timestamp, file path)` in the
//! device's attribute directory under a slot key; the consuming phase
//! (same process, a later invocation, or a crash recovery) looks the slot
//! up, checks the timestamp against a time-to-live, and reads the file
//! back. An idle-time sweep reclaims entries whose producer never came
//! back.
//!
//! Directory layout per slot:
//!
//! ```text
//! time:<slot>  ->  epoch seconds of the last successful store
//! file:<slot>  ->  path of the serialized backing file
//! ```

pub mod error;
pub mod protocol;
pub mod slot;

pub use error::HandoffError;
pub use protocol::{DEFAULT_TTL_SECS, Handoff};
pub use slot::Slot;
