//! Core types for ShaleDB.

mod ids;

pub use ids::{Lsn, PageId};
