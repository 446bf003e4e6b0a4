//! # cascade-session
//!
//! Result session store: gives identity and continuity to engine
//! computations so follow-up requests can refer back to them without
//! re-supplying inputs.
//!
//! - [`snapshot::Snapshot`] — immutable record of the parameters that
//!   produced one result identifier
//! - [`store::SessionStore`] — `put` / `get` / `evict` capability
//! - [`inmemory::InMemorySessionStore`] — bounded concurrent map with
//!   least-recently-used eviction
//!
//! Sessions are scoped to process lifetime by design; there is no
//! persistence across restarts.

pub mod inmemory;
pub mod snapshot;
pub mod store;

pub use inmemory::InMemorySessionStore;
pub use snapshot::Snapshot;
pub use store::SessionStore;
