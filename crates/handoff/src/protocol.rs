use crate::error::HandoffError;
use crate::slot::Slot;
use presslink_format::Encoding;
use presslink_registry::JobLinks;
use presslink_traits::{AttributeDirectory, Clock, SystemClock};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Entries older than this are considered abandoned and eligible for
/// sweeping.
pub const DEFAULT_TTL_SECS: u32 = 300;

const TIME_KEY_PREFIX: &str = "time:";
const FILE_KEY_PREFIX: &str = "file:";
const BACKING_FILE_PREFIX: &str = "presslink";

/// The handoff protocol over an attribute directory and a temp directory.
///
/// One instance serves any number of slots; all state lives in the
/// injected directory and the filesystem, so separate processes wired to
/// the same backing store cooperate without further coordination. The
/// discipline is: always clean your own slot before writing it, never
/// assume another process's slot is yours.
#[derive(Debug)]
pub struct Handoff {
    directory: Arc<dyn AttributeDirectory>,
    clock: Arc<dyn Clock>,
    temp_dir: PathBuf,
    ttl_secs: u32,
    encoding: Encoding,
}

impl Handoff {
    /// A handoff over `directory` with the system clock, the OS temp
    /// directory, and the default 300 s time-to-live.
    pub fn new(directory: Arc<dyn AttributeDirectory>) -> Self {
        Self {
            directory,
            clock: Arc::new(SystemClock),
            temp_dir: std::env::temp_dir(),
            ttl_secs: DEFAULT_TTL_SECS,
            encoding: Encoding::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    pub fn with_ttl(mut self, ttl_secs: u32) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Persists `table` under `slot`, replacing any previous entry.
    ///
    /// All-or-nothing: the slot is cleaned first, the table goes to a new
    /// uniquely-named file, and only then are the `file:` and `time:`
    /// keys written. A failure at any step rolls back the file and both
    /// keys, so a later load finds either the complete new entry or none.
    pub fn store(&self, table: &JobLinks, slot: Slot) -> Result<(), HandoffError> {
        self.clean(slot)?;

        let temp = tempfile::Builder::new()
            .prefix(BACKING_FILE_PREFIX)
            .suffix(".ini")
            .tempfile_in(&self.temp_dir)?;
        let (mut file, path) = temp.keep().map_err(|persist| persist.error)?;

        let bytes = presslink_format::encode(table, self.encoding);
        if let Err(err) = file.write_all(&bytes) {
            drop(file);
            self.discard_file(&path);
            return Err(err.into());
        }
        drop(file);

        let path_text = path.to_string_lossy();
        if let Err(err) = self
            .directory
            .set_string(&file_key(slot), path_text.as_ref())
        {
            self.discard_file(&path);
            return Err(err.into());
        }
        if let Err(err) = self.directory.set_u32(&time_key(slot), self.clock.now_epoch()) {
            let _ = self.directory.remove(&file_key(slot));
            self.discard_file(&path);
            return Err(err.into());
        }

        log::debug!(
            "stored {} page(s) of link data for slot {slot} in {}",
            table.page_count(),
            path.display()
        );
        Ok(())
    }

    /// Loads the table stored under `slot`, without a freshness check.
    ///
    /// Used to re-attach to state written earlier under the same slot
    /// value, e.g. by an earlier phase of the same logical job.
    pub fn load(&self, slot: Slot) -> Result<JobLinks, HandoffError> {
        let path = self
            .directory
            .get_string(&file_key(slot))?
            .filter(|path| !path.is_empty())
            .ok_or(HandoffError::NotFound(slot))?;
        let bytes = fs::read(&path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                HandoffError::NotFound(slot)
            } else {
                HandoffError::Io(err)
            }
        })?;
        log::debug!("loaded link data for slot {slot} from {path}");
        Ok(presslink_format::parse_bytes(&bytes))
    }

    /// Re-reads the slot's backing file mid-job. Same semantics as
    /// [`Handoff::load`]; the separate name marks the intent of picking
    /// up a collaborator's in-place rewrite.
    pub fn reload(&self, slot: Slot) -> Result<JobLinks, HandoffError> {
        self.load(slot)
    }

    /// Loads the table stored under `slot` if its entry is current.
    ///
    /// Fails with `NotFound` when no timestamp exists and with `Expired`
    /// when the entry's age has reached the time-to-live. Expired entries
    /// are left in place; reclaiming them is [`Handoff::sweep`]'s job.
    pub fn load_fresh(&self, slot: Slot) -> Result<JobLinks, HandoffError> {
        let stamp = self
            .directory
            .get_u32(&time_key(slot))?
            .filter(|stamp| *stamp != 0)
            .ok_or(HandoffError::NotFound(slot))?;
        let age_secs = self.clock.now_epoch().saturating_sub(stamp);
        if age_secs >= self.ttl_secs {
            return Err(HandoffError::Expired { slot, age_secs });
        }
        self.load(slot)
    }

    /// Rewrites the slot's existing backing file with `table`.
    ///
    /// The directory entry and its timestamp are untouched; this is how a
    /// collaborator reports back test-pass results through the same file.
    pub fn update(&self, table: &JobLinks, slot: Slot) -> Result<(), HandoffError> {
        let path = self
            .directory
            .get_string(&file_key(slot))?
            .filter(|path| !path.is_empty())
            .ok_or(HandoffError::NotFound(slot))?;
        fs::write(&path, presslink_format::encode(table, self.encoding))?;
        log::debug!("updated link data for slot {slot} in {path}");
        Ok(())
    }

    /// Removes the slot's backing file and both directory keys.
    ///
    /// File deletion is best-effort (a vanished file is fine, anything
    /// else is logged and ignored); the keys are always erased. Safe to
    /// call for a slot that was never populated, and safe to race with
    /// another cleaner.
    pub fn clean(&self, slot: Slot) -> Result<(), HandoffError> {
        if let Some(path) = self.directory.get_string(&file_key(slot))?
            && !path.is_empty()
        {
            self.discard_file(Path::new(&path));
        }
        self.directory.remove(&file_key(slot))?;
        self.directory.remove(&time_key(slot))?;
        Ok(())
    }

    /// Reclaims every slot whose entry has outlived the time-to-live.
    ///
    /// Entries with malformed or missing slot suffixes are skipped, and
    /// losing a race to a concurrent cleaner is a no-op. Returns the
    /// number of slots cleaned.
    pub fn sweep(&self) -> Result<usize, HandoffError> {
        let names = self.directory.names_with_prefix(TIME_KEY_PREFIX)?;
        let now = self.clock.now_epoch();
        let mut cleaned = 0;
        for name in names {
            let Some(stamp) = self.directory.get_u32(&name)? else {
                continue;
            };
            if stamp == 0 || now.saturating_sub(stamp) < self.ttl_secs {
                continue;
            }
            let Some(id) = name
                .strip_prefix(TIME_KEY_PREFIX)
                .and_then(|suffix| suffix.parse::<u32>().ok())
            else {
                continue;
            };
            let slot = Slot::from(id);
            self.clean(slot)?;
            log::info!("swept expired link data for slot {slot}");
            cleaned += 1;
        }
        Ok(cleaned)
    }

    fn discard_file(&self, path: &Path) {
        if let Err(err) = fs::remove_file(path)
            && err.kind() != ErrorKind::NotFound
        {
            log::warn!("failed to delete backing file {}: {err}", path.display());
        }
    }
}

fn time_key(slot: Slot) -> String {
    format!("{TIME_KEY_PREFIX}{slot}")
}

fn file_key(slot: Slot) -> String {
    format!("{FILE_KEY_PREFIX}{slot}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use presslink_traits::{InMemoryAttributeDirectory, ManualClock};

    fn test_handoff() -> (Arc<InMemoryAttributeDirectory>, Arc<ManualClock>, Handoff, tempfile::TempDir) {
        let directory = Arc::new(InMemoryAttributeDirectory::new());
        let clock = Arc::new(ManualClock::new(1_000_000));
        let scratch = tempfile::tempdir().unwrap();
        let handoff = Handoff::new(directory.clone())
            .with_clock(clock.clone())
            .with_temp_dir(scratch.path());
        (directory, clock, handoff, scratch)
    }

    fn sample_table() -> JobLinks {
        let mut table = JobLinks::new();
        table.add_text_link("https://example.org", "Click here", 1, 2);
        table
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let (_dir, _clock, handoff, _scratch) = test_handoff();
        let table = sample_table();
        let slot = Slot::from(100);

        handoff.store(&table, slot).unwrap();
        assert_eq!(handoff.load(slot).unwrap(), table);
        assert_eq!(handoff.load_fresh(slot).unwrap(), table);
    }

    #[test]
    fn test_load_missing_slot_is_not_found() {
        let (_dir, _clock, handoff, _scratch) = test_handoff();
        assert!(matches!(
            handoff.load(Slot::from(1)),
            Err(HandoffError::NotFound(_))
        ));
        assert!(matches!(
            handoff.load_fresh(Slot::from(1)),
            Err(HandoffError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_fresh_expires_at_ttl() {
        let (_dir, clock, handoff, _scratch) = test_handoff();
        let slot = Slot::from(7);
        handoff.store(&sample_table(), slot).unwrap();

        clock.advance(DEFAULT_TTL_SECS - 1);
        assert!(handoff.load_fresh(slot).is_ok());

        clock.advance(1);
        assert!(matches!(
            handoff.load_fresh(slot),
            Err(HandoffError::Expired { age_secs: 300, .. })
        ));
        // Expiry does not delete anything; plain load still works.
        assert!(handoff.load(slot).is_ok());
    }

    #[test]
    fn test_store_replaces_previous_backing_file() {
        let (dir, _clock, handoff, _scratch) = test_handoff();
        let slot = Slot::from(8);
        handoff.store(&sample_table(), slot).unwrap();
        let first = dir.get_string("file:8").unwrap().unwrap();

        handoff.store(&JobLinks::new(), slot).unwrap();
        let second = dir.get_string("file:8").unwrap().unwrap();

        assert_ne!(first, second);
        assert!(!Path::new(&first).exists());
        assert!(Path::new(&second).exists());
    }

    #[test]
    fn test_update_rewrites_same_file() {
        let (dir, _clock, handoff, _scratch) = test_handoff();
        let slot = Slot::from(9);
        handoff.store(&sample_table(), slot).unwrap();
        let path = dir.get_string("file:9").unwrap().unwrap();
        let stamp = dir.get_u32("time:9").unwrap().unwrap();

        let mut revised = sample_table();
        revised.set_test_mode(true);
        handoff.update(&revised, slot).unwrap();

        assert_eq!(dir.get_string("file:9").unwrap().unwrap(), path);
        assert_eq!(dir.get_u32("time:9").unwrap().unwrap(), stamp);
        assert_eq!(handoff.reload(slot).unwrap(), revised);
    }

    #[test]
    fn test_update_without_store_is_not_found() {
        let (_dir, _clock, handoff, _scratch) = test_handoff();
        assert!(matches!(
            handoff.update(&sample_table(), Slot::from(10)),
            Err(HandoffError::NotFound(_))
        ));
    }

    #[test]
    fn test_clean_removes_file_and_keys() {
        let (dir, _clock, handoff, _scratch) = test_handoff();
        let slot = Slot::from(11);
        handoff.store(&sample_table(), slot).unwrap();
        let path = dir.get_string("file:11").unwrap().unwrap();

        handoff.clean(slot).unwrap();
        assert!(!Path::new(&path).exists());
        assert_eq!(dir.get_string("file:11").unwrap(), None);
        assert_eq!(dir.get_u32("time:11").unwrap(), None);
    }

    #[test]
    fn test_clean_twice_on_empty_slot_succeeds() {
        let (_dir, _clock, handoff, _scratch) = test_handoff();
        let slot = Slot::from(12);
        handoff.clean(slot).unwrap();
        handoff.clean(slot).unwrap();
    }

    #[test]
    fn test_sweep_reclaims_only_expired_slots() {
        let (dir, clock, handoff, _scratch) = test_handoff();
        let stale = Slot::from(20);
        let current = Slot::from(21);

        handoff.store(&sample_table(), stale).unwrap();
        clock.advance(DEFAULT_TTL_SECS);
        handoff.store(&sample_table(), current).unwrap();

        let stale_path = dir.get_string("file:20").unwrap().unwrap();
        assert_eq!(handoff.sweep().unwrap(), 1);

        assert!(!Path::new(&stale_path).exists());
        assert_eq!(dir.get_u32("time:20").unwrap(), None);
        assert!(handoff.load_fresh(current).is_ok());
    }

    #[test]
    fn test_sweep_skips_malformed_suffixes() {
        let (dir, clock, handoff, _scratch) = test_handoff();
        dir.set_u32("time:not-a-slot", 1).unwrap();
        clock.advance(DEFAULT_TTL_SECS * 2);

        assert_eq!(handoff.sweep().unwrap(), 0);
        // The malformed entry is ignored, not deleted.
        assert_eq!(dir.get_u32("time:not-a-slot").unwrap(), Some(1));
    }

    #[test]
    fn test_sweep_on_empty_directory_is_noop() {
        let (_dir, _clock, handoff, _scratch) = test_handoff();
        assert_eq!(handoff.sweep().unwrap(), 0);
    }
}
