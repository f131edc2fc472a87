//! System-wide constants for ShaleDB.

// =============================================================================
// Page Geometry
// =============================================================================

/// Page size in bytes (4 KB).
///
/// The unit of disk I/O and cache residency. Matches the typical OS page
/// size and SSD block size.
pub const PAGE_SIZE: usize = 4 * 1024;

// =============================================================================
// Buffer Pool Sizing
// =============================================================================

/// Default number of frames per buffer pool instance.
pub const DEFAULT_POOL_SIZE: usize = 1024;

/// Default number of buffer pool instances.
///
/// A single instance behaves exactly like an unsharded pool; raising this
/// spreads latch contention across disjoint shards.
pub const DEFAULT_NUM_INSTANCES: usize = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size() {
        assert!(PAGE_SIZE.is_power_of_two());
    }

    #[test]
    fn test_pool_defaults() {
        assert!(DEFAULT_POOL_SIZE > 0);
        assert!(DEFAULT_NUM_INSTANCES > 0);
    }
}
