//! The operation surface consumed by the transport layer.
//!
//! `EventService` wires the normalizer, store, and query engine
//! together behind plain function calls. Handlers map these directly
//! to routes; nothing here knows about HTTP.

use eventline_core::{Clock, EventRecord, Result, SystemClock};
use eventline_ingest::{normalize, ContentKind};
use eventline_query::{QueryEngine, StoreStats, UserActivity, UserEvents};
use eventline_store::{EventStore, JsonSnapshotStore, MemorySnapshotStore, SnapshotStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReceipt {
    /// Newly appended records, in submission order. May be empty for a
    /// batch or text payload where nothing validated.
    pub accepted: Vec<EventRecord>,
    /// Store size after the append.
    pub total_events: usize,
}

/// Event ingestion and query service.
///
/// Holds the store behind an `Arc`; `Clone` shares it. All mutating
/// calls serialize inside the store; queries observe a consistent
/// call-time snapshot.
#[derive(Clone)]
pub struct EventService {
    store: Arc<EventStore>,
    query: QueryEngine,
    clock: Arc<dyn Clock>,
}

impl EventService {
    /// Open a service persisting snapshots as JSON at `path`.
    ///
    /// A prior snapshot is loaded; absent or corrupt snapshots start
    /// the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_gateway(Box::new(JsonSnapshotStore::new(path)))
    }

    /// Open a service with no durable persistence (tests, demos).
    pub fn ephemeral() -> Self {
        Self::with_gateway(Box::new(MemorySnapshotStore::new()))
    }

    /// Open a service over a caller-provided persistence gateway.
    pub fn with_gateway(gateway: Box<dyn SnapshotStore>) -> Self {
        let store = Arc::new(EventStore::open(gateway));
        let query = QueryEngine::new(Arc::clone(&store));
        Self {
            store,
            query,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the ingestion clock. Intended for tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and append one submission.
    ///
    /// The whole submission is appended with a single snapshot save.
    /// Errors reject the submission and leave the store untouched,
    /// except for a snapshot-save failure, which surfaces after the
    /// records are already in memory.
    pub fn ingest(&self, kind: ContentKind, payload: &str) -> Result<IngestReceipt> {
        let accepted = normalize(kind, payload, self.clock.as_ref())?;
        self.store.append_batch(accepted.clone())?;
        let total_events = self.store.len();
        tracing::debug!(accepted = accepted.len(), total_events, "ingested submission");
        Ok(IngestReceipt {
            accepted,
            total_events,
        })
    }

    /// Records matching the optional exact-equality filters, in order.
    pub fn query_all(
        &self,
        user_id: Option<&str>,
        event_type: Option<&str>,
    ) -> Vec<EventRecord> {
        self.query.filter_events(user_id, event_type)
    }

    /// All records for one user, with their count.
    pub fn query_by_user(&self, user_id: &str) -> UserEvents {
        self.query.events_for_user(user_id)
    }

    /// Distinct users with per-user activity.
    pub fn list_users(&self) -> HashMap<String, UserActivity> {
        self.query.list_users()
    }

    /// Distinct event types with counts.
    pub fn list_event_types(&self) -> HashMap<String, usize> {
        self.query.list_event_types()
    }

    /// Store-wide summary.
    pub fn stats(&self) -> StoreStats {
        self.query.stats()
    }

    /// Remove every record. All-or-nothing; writes through.
    pub fn clear_all(&self) -> Result<()> {
        self.store.clear()
    }

    /// Number of stored records.
    pub fn total_events(&self) -> usize {
        self.store.len()
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService")
            .field("total_events", &self.total_events())
            .finish()
    }
}
