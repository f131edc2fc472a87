//! Page handle - the caller-facing reference to a pinned page.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use shale_common::PageId;

use crate::frame::{BufferFrame, FrameId};

/// Reference to a pinned page.
///
/// Produced by `fetch_page` / `new_page` with the pin already taken. The
/// handle stays valid until the caller releases the pin with
/// `unpin_page(page_id, is_dirty)`; dropping the handle does *not* release
/// it, and the dirty bit is driven solely by the flag passed to that call,
/// not by mutable access here.
///
/// Callers may only touch the page bytes; frame metadata belongs to the
/// pool.
pub struct PageHandle {
    frame: Arc<BufferFrame>,
    page_id: PageId,
}

impl PageHandle {
    pub(crate) fn new(frame: Arc<BufferFrame>, page_id: PageId) -> Self {
        Self { frame, page_id }
    }

    /// Returns the page ID.
    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Returns the frame ID.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame.frame_id()
    }

    /// Returns read access to the page bytes.
    #[inline]
    pub fn data(&self) -> impl Deref<Target = [u8]> + '_ {
        PageDataRef {
            guard: self.frame.read_data(),
        }
    }

    /// Returns write access to the page bytes.
    ///
    /// Mutating the buffer does not mark the page dirty; report the
    /// modification through `unpin_page(page_id, true)`.
    #[inline]
    pub fn data_mut(&mut self) -> impl DerefMut<Target = [u8]> + '_ {
        PageDataMut {
            guard: self.frame.write_data(),
        }
    }
}

impl std::fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHandle")
            .field("page_id", &self.page_id)
            .field("frame_id", &self.frame.frame_id())
            .finish()
    }
}

/// Helper struct to provide Deref for page data.
struct PageDataRef<'a> {
    guard: parking_lot::RwLockReadGuard<'a, Vec<u8>>,
}

impl Deref for PageDataRef<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Helper struct to provide DerefMut for page data.
struct PageDataMut<'a> {
    guard: parking_lot::RwLockWriteGuard<'a, Vec<u8>>,
}

impl Deref for PageDataMut<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for PageDataMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_data_access() {
        let frame = Arc::new(BufferFrame::new(FrameId::new(0)));
        let mut handle = PageHandle::new(Arc::clone(&frame), PageId::new(42));

        assert_eq!(handle.page_id(), PageId::new(42));
        assert_eq!(handle.frame_id(), FrameId::new(0));

        handle.data_mut()[0..4].copy_from_slice(&[5, 6, 7, 8]);
        assert_eq!(&handle.data()[0..4], &[5, 6, 7, 8]);

        // The write landed in the shared frame
        assert_eq!(&frame.read_data()[0..4], &[5, 6, 7, 8]);
    }

    #[test]
    fn test_data_mut_does_not_set_dirty() {
        let frame = Arc::new(BufferFrame::new(FrameId::new(0)));
        let mut handle = PageHandle::new(Arc::clone(&frame), PageId::new(1));

        handle.data_mut()[0] = 1;
        assert!(!frame.is_dirty());
    }

    #[test]
    fn test_drop_does_not_unpin() {
        let frame = Arc::new(BufferFrame::new(FrameId::new(0)));
        frame.pin();
        {
            let _handle = PageHandle::new(Arc::clone(&frame), PageId::new(1));
        }
        assert_eq!(frame.pin_count(), 1);
    }
}
