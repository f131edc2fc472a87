//! Single buffer pool instance.
//!
//! An instance owns a fixed array of frames, the page table mapping
//! resident page ids to frames, a free list, an LRU replacer, and a
//! monotonic page-id allocator. Every public operation takes the instance
//! latch for its whole duration, including any disk I/O it performs, so
//! state transitions are serial per instance. Parallelism comes from
//! running several instances side by side (see `ParallelBufferPool`).

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use shale_common::PageId;
use shale_storage::disk::DiskManager;
use shale_storage::wal::LogManager;
use tracing::{debug, trace};

use crate::error::{BufferError, BufferResult};
use crate::frame::{BufferFrame, FrameId};
use crate::handle::PageHandle;
use crate::replacer::LruReplacer;
use crate::stats::{BufferPoolStats, PoolCounters};

/// Bookkeeping guarded by the instance latch.
///
/// Every frame id is in exactly one place: the free list, or the page
/// table's value set. A resident frame additionally appears in the
/// replacer exactly when its pin count is zero.
struct InstanceState {
    /// Maps resident page ids to their frames.
    page_table: HashMap<PageId, FrameId>,
    /// Frames holding no page; consumed from the front.
    free_list: VecDeque<FrameId>,
    /// Next page id this instance will hand out.
    next_page_id: u64,
}

/// One shard of the buffer pool.
///
/// The instance only ever allocates page ids congruent to its own index
/// modulo the instance count, which keeps `page_id mod num_instances`
/// invertible at the pool level. A standalone cache is simply an instance
/// built with [`BufferPoolInstance::single`].
pub struct BufferPoolInstance {
    pool_size: usize,
    num_instances: u64,
    instance_index: u64,
    /// Frame storage; shared out to callers via `PageHandle`.
    frames: Vec<Arc<BufferFrame>>,
    /// The instance latch.
    state: Mutex<InstanceState>,
    replacer: LruReplacer,
    disk: Arc<dyn DiskManager>,
    /// Reserved for the recovery subsystem; never invoked here.
    log: Option<Arc<dyn LogManager>>,
    counters: PoolCounters,
}

impl BufferPoolInstance {
    /// Creates instance `instance_index` of `num_instances` with
    /// `pool_size` frames, all initially free.
    pub fn new(
        pool_size: usize,
        num_instances: usize,
        instance_index: usize,
        disk: Arc<dyn DiskManager>,
        log: Option<Arc<dyn LogManager>>,
    ) -> BufferResult<Self> {
        if pool_size == 0 {
            return Err(BufferError::config("pool_size must be > 0"));
        }
        if num_instances == 0 {
            return Err(BufferError::config("num_instances must be > 0"));
        }
        if instance_index >= num_instances {
            return Err(BufferError::config(
                "instance_index must be < num_instances",
            ));
        }

        let frames = (0..pool_size)
            .map(|i| Arc::new(BufferFrame::new(FrameId::new(i))))
            .collect();
        let free_list = (0..pool_size).map(FrameId::new).collect();

        Ok(Self {
            pool_size,
            num_instances: num_instances as u64,
            instance_index: instance_index as u64,
            frames,
            state: Mutex::new(InstanceState {
                page_table: HashMap::with_capacity(pool_size),
                free_list,
                next_page_id: instance_index as u64,
            }),
            replacer: LruReplacer::new(pool_size),
            disk,
            log,
            counters: PoolCounters::default(),
        })
    }

    /// Creates a standalone, unsharded instance.
    pub fn single(
        pool_size: usize,
        disk: Arc<dyn DiskManager>,
        log: Option<Arc<dyn LogManager>>,
    ) -> BufferResult<Self> {
        Self::new(pool_size, 1, 0, disk, log)
    }

    /// Returns the number of frames in this instance.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Returns this instance's index within its pool.
    pub fn instance_index(&self) -> usize {
        self.instance_index as usize
    }

    /// Returns the write-ahead log handle, if one was attached.
    ///
    /// The instance carries it on behalf of the recovery subsystem and
    /// never calls it.
    pub fn log_manager(&self) -> Option<&Arc<dyn LogManager>> {
        self.log.as_ref()
    }

    /// Returns true if `page_id` is resident in this instance.
    pub fn contains(&self, page_id: PageId) -> bool {
        self.state.lock().page_table.contains_key(&page_id)
    }

    /// Allocates a fresh page and returns it pinned.
    ///
    /// The new page's buffer is zeroed and written through to disk so the
    /// id is recoverable even if it is never modified. Fails with
    /// [`BufferError::NoFreeFrames`] when every frame is pinned.
    pub fn new_page(&self) -> BufferResult<PageHandle> {
        let mut state = self.state.lock();

        let frame_id = self.find_victim(&mut state)?;
        let frame = Arc::clone(&self.frames[frame_id.index()]);
        let page_id = self.allocate_page_id(&mut state);

        frame.zero_data();
        frame.set_page_id(page_id);
        frame.set_dirty(false);
        frame.pin();
        state.page_table.insert(page_id, frame_id);
        self.replacer.pin(frame_id);

        let persisted = self
            .disk
            .allocate_page(page_id)
            .and_then(|()| self.disk.write_page(page_id, &frame.read_data()[..]));
        if let Err(e) = persisted {
            // Unwind so the frame is not stranded outside the free list.
            // The allocator is not rolled back; ids are never reused.
            state.page_table.remove(&page_id);
            frame.reset();
            state.free_list.push_back(frame_id);
            return Err(e.into());
        }

        trace!(page_id = %page_id, frame = frame_id.index(), "allocated page");
        Ok(PageHandle::new(frame, page_id))
    }

    /// Fetches `page_id`, reading it from disk if not resident, and
    /// returns it pinned.
    ///
    /// Fails with [`BufferError::NoFreeFrames`] when the page is not
    /// resident and every frame is pinned.
    pub fn fetch_page(&self, page_id: PageId) -> BufferResult<PageHandle> {
        if !page_id.is_valid() {
            return Err(BufferError::InvalidPageId { page_id });
        }
        self.counters.record_fetch();
        let mut state = self.state.lock();

        if let Some(&frame_id) = state.page_table.get(&page_id) {
            self.counters.record_hit();
            let frame = &self.frames[frame_id.index()];
            frame.pin();
            self.replacer.pin(frame_id);
            return Ok(PageHandle::new(Arc::clone(frame), page_id));
        }

        self.counters.record_miss();
        let frame_id = self.find_victim(&mut state)?;
        let frame = Arc::clone(&self.frames[frame_id.index()]);

        {
            let mut data = frame.write_data();
            if let Err(e) = self.disk.read_page(page_id, &mut data[..]) {
                drop(data);
                frame.reset();
                state.free_list.push_back(frame_id);
                return Err(e.into());
            }
        }

        frame.set_page_id(page_id);
        frame.set_dirty(false);
        frame.pin();
        state.page_table.insert(page_id, frame_id);
        self.replacer.pin(frame_id);
        Ok(PageHandle::new(frame, page_id))
    }

    /// Releases one pin on `page_id`, OR-ing `is_dirty` into its dirty
    /// bit. When the last pin is released the frame becomes an eviction
    /// candidate.
    ///
    /// Fails with [`BufferError::PageNotFound`] if the page is not
    /// resident and [`BufferError::NotPinned`] if its pin count is already
    /// zero; in both cases the dirty bit is left untouched.
    pub fn unpin_page(&self, page_id: PageId, is_dirty: bool) -> BufferResult<()> {
        let state = self.state.lock();

        let &frame_id = state
            .page_table
            .get(&page_id)
            .ok_or(BufferError::PageNotFound { page_id })?;
        let frame = &self.frames[frame_id.index()];
        if frame.pin_count() == 0 {
            return Err(BufferError::NotPinned { page_id });
        }

        if is_dirty {
            frame.set_dirty(true);
        }
        if frame.unpin() == 0 {
            self.replacer.unpin(frame_id);
        }
        Ok(())
    }

    /// Writes `page_id` back to disk and clears its dirty bit. Residency
    /// and pin count are unchanged; the page is written even when clean.
    pub fn flush_page(&self, page_id: PageId) -> BufferResult<()> {
        if !page_id.is_valid() {
            return Err(BufferError::InvalidPageId { page_id });
        }
        let state = self.state.lock();

        let &frame_id = state
            .page_table
            .get(&page_id)
            .ok_or(BufferError::PageNotFound { page_id })?;
        let frame = &self.frames[frame_id.index()];
        self.disk.write_page(page_id, &frame.read_data()[..])?;
        frame.set_dirty(false);
        self.counters.record_flush();
        Ok(())
    }

    /// Writes every resident page back to disk, returning how many pages
    /// were written.
    pub fn flush_all(&self) -> BufferResult<usize> {
        let state = self.state.lock();

        let mut flushed = 0;
        for (&page_id, &frame_id) in &state.page_table {
            let frame = &self.frames[frame_id.index()];
            self.disk.write_page(page_id, &frame.read_data()[..])?;
            frame.set_dirty(false);
            self.counters.record_flush();
            flushed += 1;
        }
        Ok(flushed)
    }

    /// Drops `page_id` from the cache and returns its id to the disk
    /// manager.
    ///
    /// Deleting a page that is not resident succeeds trivially. Fails
    /// with [`BufferError::PagePinned`] while callers still hold pins.
    pub fn delete_page(&self, page_id: PageId) -> BufferResult<()> {
        let mut state = self.state.lock();

        let frame_id = match state.page_table.get(&page_id) {
            Some(&frame_id) => frame_id,
            None => return Ok(()),
        };
        let frame = &self.frames[frame_id.index()];
        if frame.is_pinned() {
            return Err(BufferError::PagePinned { page_id });
        }

        if frame.is_dirty() {
            self.disk.write_page(page_id, &frame.read_data()[..])?;
        }
        self.disk.deallocate_page(page_id)?;

        // The frame is resident and unpinned, so it sits in the replacer;
        // take it out before it goes on the free list.
        self.replacer.pin(frame_id);
        state.page_table.remove(&page_id);
        frame.reset();
        state.free_list.push_back(frame_id);

        debug!(page_id = %page_id, frame = frame_id.index(), "deleted page");
        Ok(())
    }

    /// Returns a snapshot of this instance's statistics.
    pub fn stats(&self) -> BufferPoolStats {
        let state = self.state.lock();

        let mut pinned = 0;
        let mut dirty = 0;
        for frame in &self.frames {
            if frame.is_pinned() {
                pinned += 1;
            }
            if frame.is_dirty() {
                dirty += 1;
            }
        }

        BufferPoolStats {
            fetches: self.counters.fetches(),
            hits: self.counters.hits(),
            misses: self.counters.misses(),
            evictions: self.counters.evictions(),
            flushes: self.counters.flushes(),
            resident_frames: state.page_table.len(),
            free_frames: state.free_list.len(),
            evictable_frames: self.replacer.len(),
            pinned_frames: pinned,
            dirty_frames: dirty,
        }
    }

    /// Produces a frame the caller may overwrite: the front of the free
    /// list if any, otherwise the replacer's victim with its old contents
    /// written back (if dirty) and its page-table entry removed.
    fn find_victim(&self, state: &mut InstanceState) -> BufferResult<FrameId> {
        if let Some(frame_id) = state.free_list.pop_front() {
            return Ok(frame_id);
        }

        let frame_id = self.replacer.victim().ok_or(BufferError::NoFreeFrames)?;
        let frame = &self.frames[frame_id.index()];
        let old_page_id = frame.page_id();

        if frame.is_dirty() {
            if let Err(e) = self.disk.write_page(old_page_id, &frame.read_data()[..]) {
                // Put the victim back so the frame stays accounted for
                self.replacer.unpin(frame_id);
                return Err(e.into());
            }
            self.counters.record_flush();
        }

        state.page_table.remove(&old_page_id);
        self.counters.record_eviction();
        trace!(page_id = %old_page_id, frame = frame_id.index(), "evicted page");
        Ok(frame_id)
    }

    /// Hands out the next page id for this shard.
    ///
    /// Ids start at `instance_index` and advance by `num_instances`, so
    /// every id this instance produces maps back to it under
    /// `id mod num_instances`. Deallocated ids are never reused.
    fn allocate_page_id(&self, state: &mut InstanceState) -> PageId {
        let id = state.next_page_id;
        state.next_page_id += self.num_instances;
        debug_assert_eq!(id % self.num_instances, self.instance_index);
        PageId::new(id)
    }
}

impl std::fmt::Debug for BufferPoolInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BufferPoolInstance")
            .field("instance_index", &self.instance_index)
            .field("pool_size", &self.pool_size)
            .field("resident", &state.page_table.len())
            .field("free", &state.free_list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shale_common::PAGE_SIZE;
    use shale_storage::disk::{FileDisk, MemDisk};

    fn test_instance(pool_size: usize) -> BufferPoolInstance {
        BufferPoolInstance::single(pool_size, Arc::new(MemDisk::new()), None).unwrap()
    }

    /// Checks the residency partition and replacer-membership invariants
    /// through the stats snapshot.
    fn assert_invariants(instance: &BufferPoolInstance) {
        let stats = instance.stats();
        assert_eq!(
            stats.free_frames + stats.resident_frames,
            instance.pool_size(),
            "free list and page table must partition the frames"
        );
        assert_eq!(
            stats.evictable_frames,
            stats.resident_frames - stats.pinned_frames,
            "replacer must hold exactly the unpinned resident frames"
        );
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let disk: Arc<dyn DiskManager> = Arc::new(MemDisk::new());
        assert!(BufferPoolInstance::single(0, Arc::clone(&disk), None).is_err());
        assert!(BufferPoolInstance::new(4, 0, 0, Arc::clone(&disk), None).is_err());
        assert!(BufferPoolInstance::new(4, 2, 2, disk, None).is_err());
    }

    #[test]
    fn test_new_page_ids_are_monotonic() {
        let instance = test_instance(4);
        let ids: Vec<u64> = (0..3)
            .map(|_| {
                let page = instance.new_page().unwrap();
                let id = page.page_id();
                instance.unpin_page(id, false).unwrap();
                id.as_u64()
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_sharded_allocator_strides() {
        let disk: Arc<dyn DiskManager> = Arc::new(MemDisk::new());
        let instance = BufferPoolInstance::new(4, 3, 1, disk, None).unwrap();
        let ids: Vec<u64> = (0..3)
            .map(|_| {
                let page = instance.new_page().unwrap();
                let id = page.page_id();
                instance.unpin_page(id, false).unwrap();
                id.as_u64()
            })
            .collect();
        assert_eq!(ids, vec![1, 4, 7]);
    }

    #[test]
    fn test_new_page_persists_zeroed_page() {
        let disk = Arc::new(MemDisk::new());
        let instance = BufferPoolInstance::single(2, Arc::clone(&disk) as Arc<dyn DiskManager>, None).unwrap();

        let page = instance.new_page().unwrap();
        assert!(disk.contains(page.page_id()));
        assert!(page.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_and_evict() {
        let instance = test_instance(3);

        // Fill the pool; every frame pinned
        let p0 = instance.new_page().unwrap().page_id();
        let p1 = instance.new_page().unwrap().page_id();
        let p2 = instance.new_page().unwrap().page_id();
        assert_invariants(&instance);

        // No frame available
        let err = instance.new_page().unwrap_err();
        assert!(matches!(err, BufferError::NoFreeFrames));

        // Unpinning one page makes allocation succeed and evicts it
        instance.unpin_page(p0, false).unwrap();
        let p3 = instance.new_page().unwrap().page_id();
        assert!(!instance.contains(p0));
        assert!(instance.contains(p3));

        // p1 and p2 are still pinned, so p0 cannot come back in
        let err = instance.fetch_page(p0).unwrap_err();
        assert!(matches!(err, BufferError::NoFreeFrames));

        instance.unpin_page(p1, false).unwrap();
        let page = instance.fetch_page(p0).unwrap();
        assert_eq!(page.page_id(), p0);
        assert!(!instance.contains(p1));
        assert!(instance.contains(p2));
        assert_invariants(&instance);
    }

    #[test]
    fn test_dirty_page_survives_eviction() {
        let instance = test_instance(3);

        let mut page = instance.new_page().unwrap();
        let p0 = page.page_id();
        page.data_mut().fill(0xaa);
        drop(page);
        instance.unpin_page(p0, true).unwrap();

        // Crowd p0 out of the pool
        for _ in 0..3 {
            instance.new_page().unwrap();
        }
        assert!(!instance.contains(p0));

        // Pool is full of pinned pages; free one frame and fetch p0 back
        let stats = instance.stats();
        assert_eq!(stats.pinned_frames, 3);
        instance.unpin_page(PageId::new(1), false).unwrap();

        let page = instance.fetch_page(p0).unwrap();
        assert!(page.data().iter().all(|&b| b == 0xaa));
        assert_invariants(&instance);
    }

    #[test]
    fn test_fetch_hit_pins_again() {
        let instance = test_instance(2);
        let p0 = instance.new_page().unwrap().page_id();

        let hit = instance.fetch_page(p0).unwrap();
        assert_eq!(hit.page_id(), p0);

        let stats = instance.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.evictable_frames, 0);

        // Two pins outstanding; one unpin keeps the frame off the replacer
        instance.unpin_page(p0, false).unwrap();
        assert_eq!(instance.stats().evictable_frames, 0);
        instance.unpin_page(p0, false).unwrap();
        assert_eq!(instance.stats().evictable_frames, 1);
        assert_invariants(&instance);
    }

    #[test]
    fn test_unpin_preconditions() {
        let instance = test_instance(2);

        // Never-seen page
        let err = instance.unpin_page(PageId::new(42), false).unwrap_err();
        assert!(matches!(err, BufferError::PageNotFound { .. }));

        // Pin count already zero
        let p0 = instance.new_page().unwrap().page_id();
        instance.unpin_page(p0, false).unwrap();
        let err = instance.unpin_page(p0, true).unwrap_err();
        assert!(matches!(err, BufferError::NotPinned { .. }));

        // The failed dirty unpin must not have marked the page
        assert_eq!(instance.stats().dirty_frames, 0);
        assert_invariants(&instance);
    }

    #[test]
    fn test_dirty_bit_is_sticky() {
        let instance = test_instance(2);
        let p0 = instance.new_page().unwrap().page_id();

        instance.unpin_page(p0, true).unwrap();
        assert_eq!(instance.stats().dirty_frames, 1);

        // A later clean unpin must not clear the bit
        instance.fetch_page(p0).unwrap();
        instance.unpin_page(p0, false).unwrap();
        assert_eq!(instance.stats().dirty_frames, 1);
    }

    #[test]
    fn test_flush_page() {
        let disk = Arc::new(MemDisk::new());
        let instance = BufferPoolInstance::single(2, Arc::clone(&disk) as Arc<dyn DiskManager>, None).unwrap();

        let mut page = instance.new_page().unwrap();
        let p0 = page.page_id();
        page.data_mut()[0..4].copy_from_slice(&[1, 2, 3, 4]);
        drop(page);
        instance.unpin_page(p0, true).unwrap();

        instance.flush_page(p0).unwrap();
        assert_eq!(instance.stats().dirty_frames, 0);

        let mut on_disk = vec![0u8; PAGE_SIZE];
        disk.read_page(p0, &mut on_disk).unwrap();
        assert_eq!(&on_disk[0..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_flush_preconditions() {
        let instance = test_instance(2);

        let err = instance.flush_page(PageId::INVALID).unwrap_err();
        assert!(matches!(err, BufferError::InvalidPageId { .. }));

        let err = instance.flush_page(PageId::new(7)).unwrap_err();
        assert!(matches!(err, BufferError::PageNotFound { .. }));
    }

    #[test]
    fn test_flush_all_writes_every_resident_page() {
        let instance = test_instance(4);
        for _ in 0..3 {
            let id = instance.new_page().unwrap().page_id();
            instance.unpin_page(id, true).unwrap();
        }

        assert_eq!(instance.flush_all().unwrap(), 3);
        assert_eq!(instance.stats().dirty_frames, 0);
    }

    #[test]
    fn test_delete_page() {
        let disk = Arc::new(MemDisk::new());
        let instance = BufferPoolInstance::single(2, Arc::clone(&disk) as Arc<dyn DiskManager>, None).unwrap();

        let p0 = instance.new_page().unwrap().page_id();

        // Still pinned
        let err = instance.delete_page(p0).unwrap_err();
        assert!(matches!(err, BufferError::PagePinned { .. }));
        assert!(instance.contains(p0));

        instance.unpin_page(p0, false).unwrap();
        instance.delete_page(p0).unwrap();
        assert!(!instance.contains(p0));
        assert!(!disk.contains(p0));
        assert_invariants(&instance);

        // Deleting again is a no-op
        instance.delete_page(p0).unwrap();

        // Fetching the deallocated id reads an all-zero page
        let page = instance.fetch_page(p0).unwrap();
        assert!(page.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_delete_removes_frame_from_replacer() {
        let instance = test_instance(2);

        let p0 = instance.new_page().unwrap().page_id();
        instance.unpin_page(p0, false).unwrap();
        assert_eq!(instance.stats().evictable_frames, 1);

        instance.delete_page(p0).unwrap();
        let stats = instance.stats();
        assert_eq!(stats.evictable_frames, 0);
        assert_eq!(stats.free_frames, 2);
        assert_invariants(&instance);
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let instance = test_instance(2);
        let p0 = instance.new_page().unwrap().page_id();
        instance.unpin_page(p0, false).unwrap();
        instance.delete_page(p0).unwrap();

        let p1 = instance.new_page().unwrap().page_id();
        assert_ne!(p0, p1);
        assert_eq!(p1.as_u64(), p0.as_u64() + 1);
    }

    #[test]
    fn test_bytes_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let disk = Arc::new(FileDisk::open(dir.path().join("test.db")).unwrap());
        let instance = BufferPoolInstance::single(1, disk, None).unwrap();

        let mut page = instance.new_page().unwrap();
        let p0 = page.page_id();
        page.data_mut()[0..8].copy_from_slice(b"shale-db");
        drop(page);
        instance.unpin_page(p0, true).unwrap();
        instance.flush_page(p0).unwrap();

        // With a single frame, the next allocation evicts p0
        let p1 = instance.new_page().unwrap().page_id();
        assert!(!instance.contains(p0));
        instance.unpin_page(p1, false).unwrap();

        let page = instance.fetch_page(p0).unwrap();
        assert_eq!(&page.data()[0..8], b"shale-db");
    }

    #[test]
    fn test_eviction_order_is_lru() {
        let instance = test_instance(3);
        let p0 = instance.new_page().unwrap().page_id();
        let p1 = instance.new_page().unwrap().page_id();
        let p2 = instance.new_page().unwrap().page_id();

        // Unpin in the order p1, p2, p0
        instance.unpin_page(p1, false).unwrap();
        instance.unpin_page(p2, false).unwrap();
        instance.unpin_page(p0, false).unwrap();

        // Evictions follow the same order
        instance.new_page().unwrap();
        assert!(!instance.contains(p1));
        instance.new_page().unwrap();
        assert!(!instance.contains(p2));
        instance.new_page().unwrap();
        assert!(!instance.contains(p0));
    }

    #[test]
    fn test_log_manager_handle_is_carried() {
        use shale_common::Lsn;
        use shale_storage::disk::IoResult;

        struct NullLog;
        impl LogManager for NullLog {
            fn next_lsn(&self) -> Lsn {
                Lsn::FIRST
            }
            fn sync(&self, _lsn: Lsn) -> IoResult<()> {
                Ok(())
            }
        }

        let log: Arc<dyn LogManager> = Arc::new(NullLog);
        let instance =
            BufferPoolInstance::single(2, Arc::new(MemDisk::new()), Some(log)).unwrap();
        assert!(instance.log_manager().is_some());

        let instance = test_instance(2);
        assert!(instance.log_manager().is_none());
    }

    #[test]
    fn test_stats_counters() {
        let instance = test_instance(2);
        let p0 = instance.new_page().unwrap().page_id();
        instance.unpin_page(p0, false).unwrap();

        instance.fetch_page(p0).unwrap(); // hit
        instance.unpin_page(p0, false).unwrap();
        instance.delete_page(p0).unwrap();
        instance.fetch_page(p0).unwrap(); // miss

        let stats = instance.stats();
        assert_eq!(stats.fetches, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
