//! Outcome log port.

use crate::domain::OutcomeRecord;
use crate::error::LogWriteError;

/// Append-only sink for per-wallet outcome records.
pub trait OutcomeSink: Send + Sync {
    /// Append one record. Callers report failures but never abort on them.
    fn record(&self, record: &OutcomeRecord) -> Result<(), LogWriteError>;
}
