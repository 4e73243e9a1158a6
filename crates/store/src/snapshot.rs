//! Persistence gateway for the event store.
//!
//! The snapshot is the full ordered record sequence, serialized as a
//! self-describing JSON array so extra caller-supplied fields survive
//! round-trips. The gateway speaks `std::io::Result`; policy (tolerate
//! a corrupt load, surface a failed save) belongs to `EventStore`.

use eventline_core::EventRecord;
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Load-at-start / save-after-mutation contract.
///
/// `load` is called once when the store opens; `save` after every
/// mutating call, synchronously, with the full sequence.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted sequence.
    ///
    /// A missing snapshot is not an error: implementations return an
    /// empty sequence. An unreadable or unparseable snapshot is an
    /// error the caller may recover from.
    fn load(&self) -> io::Result<Vec<EventRecord>>;

    /// Persist the full sequence, replacing any prior snapshot.
    fn save(&self, records: &[EventRecord]) -> io::Result<()>;
}

/// File-backed snapshot store (pretty-printed JSON array).
///
/// Saves write to a sibling temp file and rename into place, so a
/// crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a gateway persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> io::Result<Vec<EventRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let records = serde_json::from_slice(&bytes)?;
        Ok(records)
    }

    fn save(&self, records: &[EventRecord]) -> io::Result<()> {
        let data = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)
    }
}

/// In-memory snapshot store for tests and ephemeral stores.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    records: Mutex<Vec<EventRecord>>,
}

impl MemorySnapshotStore {
    /// Empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway pre-seeded with a persisted sequence.
    pub fn seeded(records: Vec<EventRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> io::Result<Vec<EventRecord>> {
        Ok(self.records.lock().clone())
    }

    fn save(&self, records: &[EventRecord]) -> io::Result<()> {
        *self.records.lock() = records.to_vec();
        Ok(())
    }
}
