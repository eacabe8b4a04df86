//! Durable notification writer
//!
//! Each firing alert becomes one JSON file named
//! `netreact-<ts>-<code>.json` in the event directory. Writes are
//! synchronous and flushed to stable storage before returning, so a
//! reader polling the directory never sees a half-written file and
//! an alert survives an immediate crash. Emission failures are
//! logged and swallowed; they never abort observation processing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::event_type::EventType;
use crate::notification::Notification;

/// Writes notifications into the configured event directory
#[derive(Debug, Clone)]
pub struct NotificationStore {
    event_dir: PathBuf,
}

impl NotificationStore {
    /// Create a store rooted at the given event directory
    pub fn new<P: Into<PathBuf>>(event_dir: P) -> Self {
        Self {
            event_dir: event_dir.into(),
        }
    }

    /// The directory notifications are written to
    pub fn event_dir(&self) -> &Path {
        &self.event_dir
    }

    /// Serialize and durably write one notification. A pre-existing
    /// file of the same name is truncated and overwritten.
    pub fn store(&self, notification: &Notification, event_type: EventType) {
        let file_name = format!("netreact-{}-{}.json", notification.ts, event_type.code());
        let path = self.event_dir.join(file_name);

        let data = match serde_json::to_vec(notification) {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, "failed to serialize notification");
                return;
            }
        };

        if let Err(e) = sync_write(&path, &data) {
            error!(error = %e, path = %path.display(), "failed to write notification file");
        }
    }
}

// extra effort to make sure the events are delivered without delay
fn sync_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}
