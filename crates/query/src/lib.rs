//! Read-only derived views over the event store.
//!
//! `QueryEngine` is a stateless facade: it holds only an
//! `Arc<EventStore>` and never mutates it. Every operation snapshots
//! the full sequence once at call time and derives its view from that
//! owned copy, so an in-flight ingestion can never show through as a
//! half-appended batch.

pub mod engine;

pub use engine::{MostActiveUser, QueryEngine, StoreStats, UserActivity, UserEvents};
