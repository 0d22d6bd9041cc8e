pub mod clock;
pub mod directory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{AttributeDirectory, DirectoryError, InMemoryAttributeDirectory};
