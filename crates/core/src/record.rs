//! The stored activity record.
//!
//! An `EventRecord` is an *open* record: beyond the three required
//! fields and the server-assigned `added_at`, any caller-supplied JSON
//! fields ride along verbatim in `extra` and survive snapshot
//! round-trips. Serialization is field-tagged (flattened), so the
//! persisted layout stays forward-compatible with new fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names a structured submission must carry.
///
/// Checked by key presence only; values are never type- or
/// emptiness-validated at this layer.
pub const REQUIRED_FIELDS: [&str; 3] = ["user_id", "event_type", "event_timestamp"];

/// One stored activity entry.
///
/// # Invariants
///
/// - `added_at` is set exactly once, at ingestion, and never rewritten.
/// - `event_timestamp` is the caller's representation, stored verbatim
///   and never parsed.
/// - Records are ordered by insertion in the store; duplicates of the
///   (`user_id`, `event_type`, `event_timestamp`) tuple are distinct
///   records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Opaque user identifier. Many records may share one.
    pub user_id: String,
    /// Opaque category label.
    pub event_type: String,
    /// Caller-supplied timestamp representation, kept verbatim.
    pub event_timestamp: String,
    /// Server-assigned ISO-8601 ingestion stamp.
    pub added_at: String,
    /// Caller-supplied fields beyond the required three.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    /// Build a record with no extra fields.
    pub fn new(
        user_id: impl Into<String>,
        event_type: impl Into<String>,
        event_timestamp: impl Into<String>,
        added_at: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            event_type: event_type.into(),
            event_timestamp: event_timestamp.into(),
            added_at: added_at.into(),
            extra: Map::new(),
        }
    }

    /// Attach caller-supplied extra fields.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}
