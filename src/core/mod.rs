//! Core infrastructure shared across the crate.
//!
//! - `store`: key-value object store fronting the upstream API and the
//!   writeup cache.

pub mod store;

pub use store::{CacheKey, FsStore, ObjectStore, ViewKey, WriteupKey};
