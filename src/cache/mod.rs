//! Named cache generations for the application shell.
//!
//! A cache generation is one complete snapshot of URL-keyed response
//! entries, identified by a version string. Generations are overwritten
//! entry by entry and deleted wholesale, never merged. The [`CacheStore`]
//! trait mirrors the host cache facilities the worker needs:
//! open-or-create, lookup by request, store, list names, delete by name.
//!
//! Two backends:
//! - [`MemoryStore`] - HashMap-backed, nothing survives the process
//! - [`SqliteStore`] - persistent, generations outlive activation cycles

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{CacheStore, CachedEntry};
