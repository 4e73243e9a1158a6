//! Eventline: an embedded event-ingestion and query core.
//!
//! Clients submit user activity events (user id, event type,
//! timestamp) in one of two wire encodings and read them back
//! filtered, grouped, or summarized. This crate is the core a thin
//! transport layer calls into; it owns the in-memory store, the
//! ingestion normalizer, the query engine, and the snapshot
//! persistence seam. Routing, status codes, and process startup stay
//! outside.
//!
//! # Example
//!
//! ```
//! use eventline::{ContentKind, EventService};
//!
//! let service = EventService::ephemeral();
//! let receipt = service
//!     .ingest(ContentKind::Text, "u1 login 2024-01-01T00:00:00")
//!     .unwrap();
//! assert_eq!(receipt.accepted.len(), 1);
//! assert_eq!(service.stats().total_events, 1);
//! ```

mod service;
pub mod types;

pub use service::{EventService, IngestReceipt};
pub use types::*;
