//! Versioned cache partitions
//!
//! A partition is a named key-value bucket of stored responses. Names encode
//! a role and a version tag, so rolling out a new agent version means new
//! partitions; the old ones are reaped on activation.
//!
//! # Partition roles
//!
//! | Role | Filled by | Read by |
//! |------|-----------|---------|
//! | static | install preload, cache-first misses | cache-first |
//! | dynamic | network-first successes | network-first when offline |

pub mod key;
pub mod manifest;
pub mod memory;
pub mod storage;
pub mod version;

pub use key::RequestKey;
pub use manifest::StaticManifest;
pub use memory::MemoryStorage;
pub use storage::{CacheStorage, Partition, StoredResponse};
pub use version::{PartitionRole, VersionSet};
