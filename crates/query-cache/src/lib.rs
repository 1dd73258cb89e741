//! Query Cache
//!
//! A process-wide, single-threaded cache of remote reads.
//!
//! - [`QueryCache::fetch`] coalesces concurrent reads of the same key into one call
//! - [`Mutation::dispatch`] performs one write and invalidates the keys it affects
//! - [`MountScope`] discards responses that arrive after their owner went away
//!
//! The cache is framework-agnostic; UI bindings subscribe to invalidations and
//! drive refetches themselves.

mod cache;
mod key;
mod mutation;
mod scope;
mod state;

pub use cache::QueryCache;
pub use key::QueryKey;
pub use mutation::Mutation;
pub use scope::MountScope;
pub use state::QueryState;
