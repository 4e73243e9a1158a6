//! Event storage for eventline.
//!
//! `EventStore` is the exclusive owner of the ordered record sequence
//! and the single point of mutation. Persistence goes through the
//! `SnapshotStore` seam: `JsonSnapshotStore` for file-backed use,
//! `MemorySnapshotStore` for tests and ephemeral stores.

pub mod snapshot;
pub mod store;

pub use snapshot::{JsonSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use store::EventStore;
