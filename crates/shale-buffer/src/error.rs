//! Buffer pool errors.

use shale_common::PageId;
use thiserror::Error;

/// Result type for buffer pool operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer pool operations.
///
/// Two of these are ordinary back-pressure rather than faults:
/// [`NoFreeFrames`](BufferError::NoFreeFrames) and
/// [`PagePinned`](BufferError::PagePinned) report that every candidate
/// frame is still referenced; callers are expected to retry after
/// releasing pins. [`is_retryable`](BufferError::is_retryable) identifies
/// them.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by variant docs
pub enum BufferError {
    /// No free or evictable frame available; all frames are pinned.
    #[error("no free frames available, all pages are pinned")]
    NoFreeFrames,

    /// Page not resident in this buffer pool.
    #[error("page {page_id} not found in buffer pool")]
    PageNotFound { page_id: PageId },

    /// Page cannot be deleted while callers still hold pins on it.
    #[error("page {page_id} is pinned")]
    PagePinned { page_id: PageId },

    /// Unpin of a page whose pin count is already zero.
    #[error("page {page_id} is not pinned")]
    NotPinned { page_id: PageId },

    /// Operation on the invalid page id sentinel.
    #[error("invalid page ID: {page_id}")]
    InvalidPageId { page_id: PageId },

    /// Disk I/O error.
    #[error("disk I/O error: {0}")]
    Io(#[from] shale_storage::disk::IoError),

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl BufferError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is resource exhaustion that a caller can
    /// retry after backing off, rather than a precondition violation or
    /// an I/O fault.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NoFreeFrames | Self::PagePinned { .. })
    }
}
