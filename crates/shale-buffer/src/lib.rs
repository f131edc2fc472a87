//! # shale-buffer
//!
//! Buffer pool manager for ShaleDB.
//!
//! The buffer pool caches a bounded set of fixed-size pages in memory,
//! fetching from disk on demand, evicting unreferenced pages in LRU order,
//! and writing modified pages back before their frames are reused. The
//! cache is partitioned across independent instances so that concurrent
//! callers contend on disjoint latches.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     ParallelBufferPool                        │
//! │     dispatch by page_id mod N, round-robin allocation         │
//! │  ┌───────────────────────┐       ┌───────────────────────┐    │
//! │  │  BufferPoolInstance 0 │  ...  │ BufferPoolInstance N-1│    │
//! │  │  ───────────────────  │       │  ───────────────────  │    │
//! │  │  page table           │       │  page table           │    │
//! │  │  free list            │       │  free list            │    │
//! │  │  LruReplacer          │       │  LruReplacer          │    │
//! │  │  frames ┌──┬──┬──┐    │       │  frames ┌──┬──┬──┐    │    │
//! │  │         │f0│f1│..│    │       │         │f0│f1│..│    │    │
//! │  │         └──┴──┴──┘    │       │         └──┴──┴──┘    │    │
//! │  └───────────────────────┘       └───────────────────────┘    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use shale_buffer::{BufferPoolConfig, ParallelBufferPool};
//! use shale_storage::disk::MemDisk;
//!
//! # fn main() -> shale_buffer::BufferResult<()> {
//! let config = BufferPoolConfig::new(64).with_instances(4);
//! let pool = ParallelBufferPool::new(config, Arc::new(MemDisk::new()), None)?;
//!
//! let page = pool.new_page()?;
//! let page_id = page.page_id();
//! // ... write through page.data_mut(), then release the pin:
//! pool.unpin_page(page_id, true)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod frame;
mod handle;
mod instance;
mod pool;
mod replacer;
mod stats;

pub use config::BufferPoolConfig;
pub use error::{BufferError, BufferResult};
pub use frame::{BufferFrame, FrameId};
pub use handle::PageHandle;
pub use instance::BufferPoolInstance;
pub use pool::ParallelBufferPool;
pub use replacer::LruReplacer;
pub use stats::BufferPoolStats;
