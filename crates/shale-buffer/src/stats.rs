//! Buffer pool statistics for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic event counters owned by a pool instance.
///
/// Counters are recorded with relaxed ordering; they are diagnostics, not
/// synchronization.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    fetches: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    flushes: AtomicU64,
}

impl PoolCounters {
    #[inline]
    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }
}

/// Point-in-time snapshot of a buffer pool's state.
///
/// Produced by `BufferPoolInstance::stats` and aggregated by
/// `ParallelBufferPool::stats`.
#[derive(Debug, Clone, Default)]
pub struct BufferPoolStats {
    /// Total number of page fetches.
    pub fetches: u64,
    /// Number of fetches served from memory.
    pub hits: u64,
    /// Number of fetches that required a disk read.
    pub misses: u64,
    /// Number of resident pages evicted to make room.
    pub evictions: u64,
    /// Number of pages written back to disk.
    pub flushes: u64,
    /// Frames currently holding a page.
    pub resident_frames: usize,
    /// Frames on the free list.
    pub free_frames: usize,
    /// Resident frames with a zero pin count (eviction candidates).
    pub evictable_frames: usize,
    /// Frames with at least one outstanding pin.
    pub pinned_frames: usize,
    /// Frames whose contents differ from disk.
    pub dirty_frames: usize,
}

impl BufferPoolStats {
    /// Returns the cache hit ratio (0.0 to 1.0).
    pub fn hit_ratio(&self) -> f64 {
        if self.fetches == 0 {
            0.0
        } else {
            self.hits as f64 / self.fetches as f64
        }
    }

    /// Merges another snapshot into this one.
    pub fn merge(&mut self, other: &BufferPoolStats) {
        self.fetches += other.fetches;
        self.hits += other.hits;
        self.misses += other.misses;
        self.evictions += other.evictions;
        self.flushes += other.flushes;
        self.resident_frames += other.resident_frames;
        self.free_frames += other.free_frames;
        self.evictable_frames += other.evictable_frames;
        self.pinned_frames += other.pinned_frames;
        self.dirty_frames += other.dirty_frames;
    }
}
