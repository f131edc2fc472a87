//! # shale-common
//!
//! Common types and constants for ShaleDB.
//!
//! This crate provides the foundational types shared by the storage and
//! buffer layers:
//!
//! - **Types**: Core identifiers (`PageId`, `Lsn`)
//! - **Constants**: Page geometry and pool sizing defaults

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod types;

// Re-export commonly used items at the crate root
pub use constants::*;
pub use types::{Lsn, PageId};
