//! Buffer pool configuration.

use shale_common::{DEFAULT_NUM_INSTANCES, DEFAULT_POOL_SIZE, PAGE_SIZE};

/// Configuration for the buffer pool.
#[derive(Debug, Clone)]
pub struct BufferPoolConfig {
    /// Number of page frames per instance.
    pub pool_size: usize,
    /// Number of independent instances the cache is sharded across.
    pub num_instances: usize,
}

impl BufferPoolConfig {
    /// Creates a new configuration with the specified frames per instance
    /// and a single instance.
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            num_instances: DEFAULT_NUM_INSTANCES,
        }
    }

    /// Sets the number of instances.
    pub fn with_instances(mut self, num_instances: usize) -> Self {
        self.num_instances = num_instances;
        self
    }

    /// Creates a configuration from a memory budget in bytes, keeping the
    /// default instance count.
    pub fn from_memory_size(memory_bytes: usize) -> Self {
        let frames = (memory_bytes / PAGE_SIZE).max(1);
        Self::new(frames)
    }

    /// Returns the total number of frames across all instances.
    pub fn total_frames(&self) -> usize {
        self.pool_size * self.num_instances
    }

    /// Returns the total memory used by page buffers.
    pub fn memory_usage(&self) -> usize {
        self.total_frames() * PAGE_SIZE
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.pool_size == 0 {
            return Err("pool_size must be > 0");
        }
        if self.num_instances == 0 {
            return Err("num_instances must be > 0");
        }
        Ok(())
    }
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}
