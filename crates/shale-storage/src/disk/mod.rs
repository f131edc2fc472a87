//! Synchronous page-granular disk I/O.
//!
//! The buffer pool performs disk I/O while holding an instance latch, so
//! every operation here is synchronous and expected to complete in bounded
//! time. Implementations must be internally synchronized: the pool calls
//! into the disk manager from many instances concurrently without any
//! cross-instance serialization.

mod error;
mod file;
mod memory;

pub use error::{IoError, IoResult};
pub use file::FileDisk;
pub use memory::MemDisk;

use shale_common::PageId;

/// Page-granular persistence contract consumed by the buffer pool.
///
/// `read_page` and `write_page` transfer exactly one page. Page-id
/// allocation is performed by the buffer pool instances, not the disk
/// layer, so `allocate_page` and `deallocate_page` default to no-ops;
/// backends may override them to reclaim space.
pub trait DiskManager: Send + Sync {
    /// Fills `buf` with the on-disk contents of `page_id`.
    ///
    /// `buf` must be exactly `PAGE_SIZE` bytes. A page that has never been
    /// written reads as all zeroes.
    fn read_page(&self, page_id: PageId, buf: &mut [u8]) -> IoResult<()>;

    /// Persists `buf` as the new contents of `page_id`.
    ///
    /// `buf` must be exactly `PAGE_SIZE` bytes.
    fn write_page(&self, page_id: PageId, buf: &[u8]) -> IoResult<()>;

    /// Notifies the backend that `page_id` is now in use.
    fn allocate_page(&self, page_id: PageId) -> IoResult<()> {
        let _ = page_id;
        Ok(())
    }

    /// Notifies the backend that `page_id` is no longer in use.
    fn deallocate_page(&self, page_id: PageId) -> IoResult<()> {
        let _ = page_id;
        Ok(())
    }

    /// Forces buffered writes to stable storage.
    fn sync(&self) -> IoResult<()> {
        Ok(())
    }
}
