use std::fmt;

/// Correlation key under which one producer's link table is registered.
///
/// The producing and consuming phases must agree on the slot value; they
/// normally run within the same OS process, so [`Slot::current`] uses the
/// process id. Note the known risk this inherits: if the operating system
/// recycles a process id within the time-to-live window, a new job can
/// load stale link data stored by the dead process that last held the id.
/// Callers that can route a job ticket between the phases should prefer
/// their own slot values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(u32);

impl Slot {
    /// The slot for the calling process, keyed by its OS process id.
    pub fn current() -> Self {
        Self(std::process::id())
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for Slot {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(Slot::from(4711).to_string(), "4711");
    }

    #[test]
    fn test_current_matches_process_id() {
        assert_eq!(Slot::current().id(), std::process::id());
    }
}
