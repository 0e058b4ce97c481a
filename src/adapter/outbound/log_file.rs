//! Append-only outcome log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::OutcomeRecord;
use crate::error::LogWriteError;
use crate::port::OutcomeSink;

/// Appends one text block per processed wallet.
///
/// Appends are serialized so concurrent callers never interleave blocks.
pub struct OutcomeLogFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl OutcomeLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeSink for OutcomeLogFile {
    fn record(&self, record: &OutcomeRecord) -> Result<(), LogWriteError> {
        let _guard = self.write_lock.lock();
        let wrap = |source| LogWriteError {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        file.write_all(record.to_block().as_bytes()).map_err(wrap)?;

        debug!(path = %self.path.display(), wallet = %record.address, "Outcome recorded");
        Ok(())
    }
}
