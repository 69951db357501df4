//! Client-side query cache.
//!
//! Results are keyed by [`QueryKey`] (operation plus parameters). Identical
//! concurrent requests share a single in-flight fetch, consumers observe
//! `Pending`/`Success`/`Error` through [`QuerySnapshot`]s, and each key kind
//! has its own staleness policy: the favorites list is refetched on every
//! read, search and detail results are reused until invalidated.

mod cache;
mod types;

pub use cache::{QueryCache, QueryCacheConfig};
pub use types::*;
