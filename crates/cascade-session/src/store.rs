use crate::snapshot::Snapshot;

/// Result session storage capability.
///
/// Keys are result identifiers: opaque strings assigned by the engine (or,
/// for orchestrator-synthesized results, a UUID). One `put` per engine
/// invocation; snapshots are immutable once stored, so there is no update
/// operation. A `get` miss means the id was never stored or has been
/// evicted — callers treat both as expiry.
pub trait SessionStore: Send + Sync + 'static {
    /// Store (or overwrite) the snapshot for `id`.
    fn put(&self, id: String, snapshot: Snapshot);

    /// Fetch the snapshot for `id`, if present.
    fn get(&self, id: &str) -> Option<Snapshot>;

    /// Drop the snapshot for `id`. Returns whether it existed.
    fn evict(&self, id: &str) -> bool;

    /// Number of live snapshots.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
