//! In-memory disk manager for tests.

use std::collections::HashMap;

use parking_lot::Mutex;
use shale_common::{PageId, PAGE_SIZE};

use super::error::{IoError, IoResult};
use super::DiskManager;

/// In-memory disk manager.
///
/// Stores pages in a hash map. Pages that were never written (or that have
/// been deallocated) read as all zeroes, matching the file backend's
/// read-past-EOF behavior. Intended for tests and benchmarks.
#[derive(Default)]
pub struct MemDisk {
    pages: Mutex<HashMap<PageId, Box<[u8]>>>,
}

impl MemDisk {
    /// Creates an empty in-memory disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pages currently stored.
    pub fn page_count(&self) -> usize {
        self.pages.lock().len()
    }

    /// Returns true if `page_id` has been written and not deallocated.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.pages.lock().contains_key(&page_id)
    }
}

impl DiskManager for MemDisk {
    fn read_page(&self, page_id: PageId, buf: &mut [u8]) -> IoResult<()> {
        if buf.len() != PAGE_SIZE {
            return Err(IoError::InvalidBufferLength {
                expected: PAGE_SIZE,
                actual: buf.len(),
            });
        }
        match self.pages.lock().get(&page_id) {
            Some(data) => buf.copy_from_slice(data),
            None => buf.fill(0),
        }
        Ok(())
    }

    fn write_page(&self, page_id: PageId, buf: &[u8]) -> IoResult<()> {
        if buf.len() != PAGE_SIZE {
            return Err(IoError::InvalidBufferLength {
                expected: PAGE_SIZE,
                actual: buf.len(),
            });
        }
        self.pages.lock().insert(page_id, buf.into());
        Ok(())
    }

    fn deallocate_page(&self, page_id: PageId) -> IoResult<()> {
        self.pages.lock().remove(&page_id);
        Ok(())
    }
}

impl std::fmt::Debug for MemDisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemDisk")
            .field("pages", &self.page_count())
            .finish()
    }
}
