//! TTL cache for VerseLight enrichment responses.
//!
//! One store, two eviction paths: reads drop stale entries they touch, and a
//! background sweep clears the ones nobody reads again.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod sweeper;

pub use cache::{generate_key, CacheConfig, CacheStats, EntryInfo, ResponseCache, Ttl};
pub use sweeper::spawn_sweeper;
