//! The in-memory event store.
//!
//! # Design
//!
//! - One `RwLock<Vec<EventRecord>>` guards the ordered sequence.
//! - Mutations (`append`, `append_batch`, `clear`) take the write lock
//!   and hold it across the snapshot save, so two concurrent
//!   submissions serialize and a reader never observes a half-appended
//!   batch.
//! - Reads clone the sequence out under the read lock; callers get an
//!   owned snapshot-at-call-time view.
//!
//! # Thread Safety
//!
//! `EventStore` is `Send + Sync`; share it via `Arc`.

use crate::snapshot::SnapshotStore;
use eventline_core::{Error, EventRecord, Result};
use parking_lot::RwLock;

/// Exclusive owner of the ordered record sequence.
///
/// Records enter only through `append`/`append_batch` (after
/// validation upstream) and leave only through `clear`. Every
/// mutation writes through to the snapshot gateway before returning.
pub struct EventStore {
    records: RwLock<Vec<EventRecord>>,
    gateway: Box<dyn SnapshotStore>,
}

impl EventStore {
    /// Open a store, loading the prior snapshot.
    ///
    /// An absent snapshot yields an empty store. So does a corrupt
    /// one: load failures are logged and swallowed, never surfaced.
    pub fn open(gateway: Box<dyn SnapshotStore>) -> Self {
        let records = match gateway.load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "snapshot unreadable, starting empty");
                Vec::new()
            }
        };
        Self {
            records: RwLock::new(records),
            gateway,
        }
    }

    /// Append one validated record and write through.
    pub fn append(&self, record: EventRecord) -> Result<()> {
        self.append_batch(vec![record])
    }

    /// Append a submission's records in order, saving exactly once.
    ///
    /// On a save failure the records stay appended in memory and
    /// `Error::Snapshot` is returned (mutate-then-save ordering).
    pub fn append_batch(&self, batch: Vec<EventRecord>) -> Result<()> {
        let mut records = self.records.write();
        records.extend(batch);
        self.gateway.save(&records).map_err(Error::Snapshot)
    }

    /// Remove every record and write through. All-or-nothing.
    pub fn clear(&self) -> Result<()> {
        let mut records = self.records.write();
        records.clear();
        tracing::debug!("event store cleared");
        self.gateway.save(&records).map_err(Error::Snapshot)
    }

    /// Owned copy of the full ordered sequence at call time.
    pub fn all(&self) -> Vec<EventRecord> {
        self.records.read().clone()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("len", &self.len())
            .finish()
    }
}
