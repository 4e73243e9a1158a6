//! Public types for the eventline unified API.
//!
//! This module re-exports types from member crates with a clean public
//! interface.

// ============================================================================
// Public API types - these are what users should use
// ============================================================================

// Core record and error types
pub use eventline_core::{Error, EventRecord, Result, REQUIRED_FIELDS};

// Clock abstraction (FixedClock is for tests)
pub use eventline_core::{Clock, FixedClock, SystemClock};

// Submission encodings
pub use eventline_ingest::ContentKind;

// Query result shapes
pub use eventline_query::{MostActiveUser, QueryEngine, StoreStats, UserActivity, UserEvents};

// Store and persistence seam (for callers wiring their own gateway)
pub use eventline_store::{EventStore, JsonSnapshotStore, MemorySnapshotStore, SnapshotStore};
