//! # shale-storage
//!
//! Disk manager and I/O layer for ShaleDB.
//!
//! This crate owns the page-granular persistence contract consumed by the
//! buffer pool:
//!
//! - [`DiskManager`](disk::DiskManager): synchronous page read/write
//! - [`FileDisk`](disk::FileDisk): single-file backend
//! - [`MemDisk`](disk::MemDisk): in-memory backend for tests
//! - [`LogManager`](wal::LogManager): write-ahead log hook reserved for
//!   the recovery subsystem

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Page-granular disk I/O
pub mod disk;

/// Write-ahead log contract
pub mod wal;
