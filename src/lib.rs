//! presslink: print-job hyperlink registry with a filesystem handoff
//! protocol.
//!
//! A page-description renderer cannot resolve hyperlinks on its own: the
//! phase that produces the print job knows *what* should become a link,
//! but only the finished page knows *where*. presslink carries that
//! metadata between the two phases. The producer fills a [`JobLinks`]
//! table, a [`Handoff`] persists it to a temp file and registers the file
//! under the producer's [`Slot`] in an [`AttributeDirectory`], and the
//! consumer loads it back within a 300 second time-to-live. Abandoned
//! entries from crashed jobs are reclaimed by [`Handoff::sweep`].
//!
//! ```no_run
//! use presslink::{JobLinks, Slot, system_handoff};
//!
//! let handoff = system_handoff("/var/lib/presslink/device0");
//!
//! let mut table = JobLinks::new();
//! table.add_text_link("https://example.org", "Click here", 1, 1);
//! handoff.store(&table, Slot::current())?;
//!
//! // ... later, in the consuming phase of the same process:
//! let table = handoff.load_fresh(Slot::current())?;
//! # Ok::<(), presslink::HandoffError>(())
//! ```

use std::path::Path;
use std::sync::Arc;

pub use presslink_types::{LinkRect, PageSize};

pub use presslink_registry::{Anchor, Destination, JobLinks, LinkRecord, PageLinks};

pub use presslink_format::{Encoding, SectionStore, deserialize, encode, parse_bytes, serialize};

pub use presslink_traits::{
    AttributeDirectory, Clock, DirectoryError, InMemoryAttributeDirectory, ManualClock,
    SystemClock,
};

pub use presslink_directory::FilesystemAttributeDirectory;

pub use presslink_handoff::{DEFAULT_TTL_SECS, Handoff, HandoffError, Slot};

/// A [`Handoff`] wired for this machine: a filesystem attribute directory
/// rooted at `device_dir`, the system clock, and the OS temp directory
/// for backing files.
pub fn system_handoff<P: AsRef<Path>>(device_dir: P) -> Handoff {
    Handoff::new(Arc::new(FilesystemAttributeDirectory::new(
        device_dir.as_ref(),
    )))
}
