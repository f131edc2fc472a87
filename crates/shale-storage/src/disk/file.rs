//! File-backed disk manager.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use shale_common::{PageId, PAGE_SIZE};

use super::error::{IoError, IoResult};
use super::DiskManager;

/// Disk manager backed by a single data file.
///
/// Page `p` lives at byte offset `p * PAGE_SIZE`. The file grows on demand
/// as higher page ids are written; reading a page past the end of the file
/// yields zeroes, so freshly allocated pages are well-defined before their
/// first write-back.
///
/// The file handle is wrapped in a mutex, which makes the manager safe to
/// share across buffer pool instances without external locking.
pub struct FileDisk {
    /// The underlying file, wrapped in a mutex for thread-safe access.
    file: Mutex<File>,
    /// The file path.
    path: PathBuf,
}

impl FileDisk {
    /// Opens (creating if necessary) the data file at `path`.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|e| IoError::from_io_with_path(e, &path))?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current size of the data file in bytes.
    pub fn size(&self) -> IoResult<u64> {
        let file = self.file.lock();
        Ok(file.metadata()?.len())
    }

    fn check_len(buf: &[u8]) -> IoResult<()> {
        if buf.len() != PAGE_SIZE {
            return Err(IoError::InvalidBufferLength {
                expected: PAGE_SIZE,
                actual: buf.len(),
            });
        }
        Ok(())
    }

    fn offset(page_id: PageId) -> u64 {
        page_id.as_u64() * PAGE_SIZE as u64
    }
}

impl DiskManager for FileDisk {
    fn read_page(&self, page_id: PageId, buf: &mut [u8]) -> IoResult<()> {
        Self::check_len(buf)?;

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(Self::offset(page_id)))?;

        // Fill the tail with zeroes when the read stops at EOF; pages that
        // were allocated but never written back read as empty.
        let mut total = 0;
        while total < buf.len() {
            let n = file.read(&mut buf[total..])?;
            if n == 0 {
                buf[total..].fill(0);
                break;
            }
            total += n;
        }
        Ok(())
    }

    fn write_page(&self, page_id: PageId, buf: &[u8]) -> IoResult<()> {
        Self::check_len(buf)?;

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(Self::offset(page_id)))?;
        file.write_all(buf)?;
        Ok(())
    }

    fn sync(&self) -> IoResult<()> {
        let file = self.file.lock();
        file.sync_all()?;
        Ok(())
    }
}

impl std::fmt::Debug for FileDisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDisk").field("path", &self.path).finish()
    }
}
