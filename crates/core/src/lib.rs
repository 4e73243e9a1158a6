//! Core types for the eventline event store.
//!
//! This crate holds the leaf types shared by every other member:
//! - `EventRecord`: one stored activity entry (open field set)
//! - `Error` / `Result`: the crate-wide error enum
//! - `Clock`: ingestion-timestamp source (swappable in tests)
//!
//! It depends on no other workspace member.

pub mod clock;
pub mod error;
pub mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use record::{EventRecord, REQUIRED_FIELDS};
