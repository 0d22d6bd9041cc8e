use crate::slot::Slot;
use presslink_traits::DirectoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandoffError {
    /// No directory entry or backing file exists for the slot.
    #[error("no stored link data for slot {0}")]
    NotFound(Slot),

    /// The slot's entry is older than the time-to-live. Nothing is
    /// deleted; cleanup is the sweep's job.
    #[error("link data for slot {slot} expired ({age_secs}s old)")]
    Expired { slot: Slot, age_secs: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
