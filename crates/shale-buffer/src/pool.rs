//! Parallel (sharded) buffer pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use shale_common::PageId;
use shale_storage::disk::DiskManager;
use shale_storage::wal::LogManager;

use crate::config::BufferPoolConfig;
use crate::error::{BufferError, BufferResult};
use crate::handle::PageHandle;
use crate::instance::BufferPoolInstance;
use crate::stats::BufferPoolStats;

/// Buffer pool sharded across independent instances.
///
/// Page-id-keyed operations dispatch to `instances[page_id mod N]`; since
/// each instance only allocates ids congruent to its own index, the
/// dispatch always lands on the allocating shard. The pool holds no lock
/// of its own, so callers working on different shards never contend.
pub struct ParallelBufferPool {
    instances: Vec<BufferPoolInstance>,
    /// Round-robin cursor for `new_page`. Read and written with relaxed
    /// ordering: races only skew the starting probe, and allocation
    /// correctness never depends on the cursor value.
    next_instance: AtomicUsize,
}

impl ParallelBufferPool {
    /// Creates a pool of `config.num_instances` instances with
    /// `config.pool_size` frames each, all sharing `disk`.
    pub fn new(
        config: BufferPoolConfig,
        disk: Arc<dyn DiskManager>,
        log: Option<Arc<dyn LogManager>>,
    ) -> BufferResult<Self> {
        config.validate().map_err(BufferError::config)?;

        let instances = (0..config.num_instances)
            .map(|i| {
                BufferPoolInstance::new(
                    config.pool_size,
                    config.num_instances,
                    i,
                    Arc::clone(&disk),
                    log.clone(),
                )
            })
            .collect::<BufferResult<Vec<_>>>()?;

        Ok(Self {
            instances,
            next_instance: AtomicUsize::new(0),
        })
    }

    /// Returns the total number of frames across all instances.
    pub fn pool_size(&self) -> usize {
        self.instances.iter().map(BufferPoolInstance::pool_size).sum()
    }

    /// Returns the number of instances.
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Returns the instance at `index`.
    pub fn instance(&self, index: usize) -> &BufferPoolInstance {
        &self.instances[index]
    }

    /// Returns the instance that owns `page_id`.
    fn instance_for(&self, page_id: PageId) -> &BufferPoolInstance {
        &self.instances[page_id.shard(self.instances.len())]
    }

    /// Allocates a fresh page from the least recently tried instance that
    /// has room.
    ///
    /// Instances are probed in rotation starting at the cursor; the
    /// cursor then advances by exactly one, whether or not any probe
    /// succeeded, so a congested shard cannot trap the rotation. Fails
    /// with [`BufferError::NoFreeFrames`] only after a full sweep.
    pub fn new_page(&self) -> BufferResult<PageHandle> {
        let num = self.instances.len();
        let start = self.next_instance.load(Ordering::Relaxed);

        let result = self.probe_new_page(start);
        self.next_instance.store((start + 1) % num, Ordering::Relaxed);
        result
    }

    fn probe_new_page(&self, start: usize) -> BufferResult<PageHandle> {
        let num = self.instances.len();
        for i in 0..num {
            match self.instances[(start + i) % num].new_page() {
                Err(BufferError::NoFreeFrames) => continue,
                other => return other,
            }
        }
        Err(BufferError::NoFreeFrames)
    }

    /// Fetches `page_id` from its owning instance.
    pub fn fetch_page(&self, page_id: PageId) -> BufferResult<PageHandle> {
        self.instance_for(page_id).fetch_page(page_id)
    }

    /// Releases one pin on `page_id` in its owning instance.
    pub fn unpin_page(&self, page_id: PageId, is_dirty: bool) -> BufferResult<()> {
        self.instance_for(page_id).unpin_page(page_id, is_dirty)
    }

    /// Writes `page_id` back to disk from its owning instance.
    pub fn flush_page(&self, page_id: PageId) -> BufferResult<()> {
        self.instance_for(page_id).flush_page(page_id)
    }

    /// Deletes `page_id` from its owning instance.
    pub fn delete_page(&self, page_id: PageId) -> BufferResult<()> {
        self.instance_for(page_id).delete_page(page_id)
    }

    /// Writes every resident page in every instance back to disk,
    /// returning how many pages were written.
    pub fn flush_all_pages(&self) -> BufferResult<usize> {
        let mut flushed = 0;
        for instance in &self.instances {
            flushed += instance.flush_all()?;
        }
        Ok(flushed)
    }

    /// Returns statistics aggregated over all instances.
    pub fn stats(&self) -> BufferPoolStats {
        let mut stats = BufferPoolStats::default();
        for instance in &self.instances {
            stats.merge(&instance.stats());
        }
        stats
    }
}

impl std::fmt::Debug for ParallelBufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelBufferPool")
            .field("num_instances", &self.instances.len())
            .field("pool_size", &self.pool_size())
            .finish()
    }
}
