//! Retention janitor
//!
//! Periodically deletes notification files once they age past the
//! configured delay. The sweep only trusts files whose name matches
//! the strict `netreact-<13-digit-ts>-<3-digit-code>.json` pattern;
//! anything else in the directory is left alone. A delay of zero
//! disables the janitor entirely. Once started it runs for the life
//! of the process; the only shared state with the processing path is
//! the filesystem.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, error};

use netreact_core::{now_millis, Error, Result};

const FILE_PATTERN: &str = r"^netreact-(?P<timestamp>[0-9]{13})-[0-9]{3}\.json$";

/// Deletes expired notification files on a fixed period
#[derive(Debug, Clone)]
pub struct EventJanitor {
    event_dir: PathBuf,
    delay_secs: u64,
    pattern: Regex,
}

impl EventJanitor {
    /// Create a janitor for the given event directory and retention
    /// delay in whole seconds.
    pub fn new<P: Into<PathBuf>>(event_dir: P, delay_secs: u64) -> Result<Self> {
        let pattern = Regex::new(FILE_PATTERN)
            .map_err(|e| Error::config(format!("invalid janitor file pattern: {e}")))?;
        Ok(Self {
            event_dir: event_dir.into(),
            delay_secs,
            pattern,
        })
    }

    /// Spawn the background sweep thread. A zero delay means the
    /// janitor is disabled and no thread is started. There is no
    /// cancellation; the thread ends with the process.
    pub fn start(self) {
        if self.delay_secs == 0 {
            return;
        }

        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(self.delay_secs));
            self.sweep_older_than(self.boundary(now_millis()));
        });
    }

    // saturates instead of wrapping for absurd delays; a boundary of
    // i64::MIN simply never matches a file
    fn boundary(&self, now_ms: i64) -> i64 {
        let delay_ms = i64::try_from(self.delay_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        now_ms.saturating_sub(delay_ms)
    }

    /// Delete every matching notification file whose embedded
    /// timestamp is at or before the boundary. Exposed with an
    /// explicit boundary so tests can drive time.
    pub fn sweep_older_than(&self, boundary_ms: i64) {
        let entries = match std::fs::read_dir(&self.event_dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, dir = %self.event_dir.display(), "janitor failed to list event directory");
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            // present in the directory but not one of ours
            let Some(captures) = self.pattern.captures(name) else {
                continue;
            };
            let Ok(timestamp) = captures["timestamp"].parse::<i64>() else {
                continue;
            };
            if timestamp > boundary_ms {
                // file is too fresh
                continue;
            }

            debug!(file = name, "removing expired notification file");
            if let Err(e) = std::fs::remove_file(entry.path()) {
                error!(error = %e, file = name, "janitor failed to remove file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &std::path::Path, name: &str) {
        std::fs::write(dir.join(name), b"{}").unwrap();
    }

    #[test]
    fn test_sweep_removes_expired_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "netreact-1700000000000-100.json");
        touch(dir.path(), "netreact-1700000005000-200.json");

        let janitor = EventJanitor::new(dir.path(), 2).unwrap();
        janitor.sweep_older_than(1700000002000);

        assert!(!dir.path().join("netreact-1700000000000-100.json").exists());
        assert!(dir.path().join("netreact-1700000005000-200.json").exists());
    }

    #[test]
    fn test_sweep_boundary_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "netreact-1700000002000-100.json");

        let janitor = EventJanitor::new(dir.path(), 2).unwrap();
        janitor.sweep_older_than(1700000002000);

        assert!(!dir.path().join("netreact-1700000002000-100.json").exists());
    }

    #[test]
    fn test_sweep_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "netreact-123-100.json"); // timestamp too short
        touch(dir.path(), "netreact-1700000000000-1000.json"); // code too long
        touch(dir.path(), "other-1700000000000-100.json");
        touch(dir.path(), "notes.txt");

        let janitor = EventJanitor::new(dir.path(), 2).unwrap();
        janitor.sweep_older_than(i64::MAX);

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }

    #[test]
    fn test_sweep_on_missing_directory_does_not_panic() {
        let janitor = EventJanitor::new("/nonexistent/netreact-janitor-dir", 2).unwrap();
        janitor.sweep_older_than(i64::MAX);
    }

    #[test]
    fn test_boundary_saturates_on_huge_delay() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "netreact-1700000000000-100.json");

        let janitor = EventJanitor::new(dir.path(), u64::MAX).unwrap();
        let boundary = janitor.boundary(now_millis());
        assert_eq!(boundary, i64::MIN);

        // nothing is older than a saturated boundary
        janitor.sweep_older_than(boundary);
        assert!(dir.path().join("netreact-1700000000000-100.json").exists());
    }

    #[test]
    fn test_boundary_for_ordinary_delay() {
        let janitor = EventJanitor::new("/tmp", 30).unwrap();
        assert_eq!(janitor.boundary(1700000000000), 1700000000000 - 30_000);
    }

    #[test]
    fn test_zero_delay_never_starts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "netreact-1700000000000-100.json");

        let janitor = EventJanitor::new(dir.path(), 0).unwrap();
        janitor.start();
        thread::sleep(Duration::from_millis(50));

        // nothing swept: a zero delay disables the janitor
        assert!(dir.path().join("netreact-1700000000000-100.json").exists());
    }

    #[test]
    fn test_started_janitor_sweeps_after_delay() {
        let dir = tempfile::tempdir().unwrap();
        let now = now_millis();
        let fresh = now + 2000;
        touch(dir.path(), &format!("netreact-{now}-100.json"));
        touch(dir.path(), &format!("netreact-{fresh}-100.json"));

        let janitor = EventJanitor::new(dir.path(), 1).unwrap();
        janitor.start();
        thread::sleep(Duration::from_millis(1500));

        assert!(!dir.path().join(format!("netreact-{now}-100.json")).exists());
        assert!(dir.path().join(format!("netreact-{fresh}-100.json")).exists());
    }
}
