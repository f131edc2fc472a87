//! Write-ahead log contract.
//!
//! The buffer pool accepts a [`LogManager`] handle on behalf of the
//! recovery subsystem but never invokes it itself: pages are written back
//! without forcing the log. Implementations targeting stronger durability
//! should funnel write-backs through the log before acknowledging them.

use shale_common::Lsn;

use crate::disk::IoResult;

/// Contract exposed by the write-ahead log.
pub trait LogManager: Send + Sync {
    /// Returns the next LSN the log will assign.
    fn next_lsn(&self) -> Lsn;

    /// Forces all records up to `lsn` to stable storage.
    fn sync(&self, lsn: Lsn) -> IoResult<()>;
}
