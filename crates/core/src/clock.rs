//! Ingestion timestamp source.
//!
//! `added_at` stamps come from a `Clock` rather than from `Utc::now()`
//! call sites, so tests can pin the stamp and assert on whole records.

use chrono::{SecondsFormat, Utc};

/// Source of the server-assigned `added_at` stamp.
///
/// Implementations must be cheap to call; the normalizer stamps every
/// accepted record.
pub trait Clock: Send + Sync {
    /// Current time as an ISO-8601 string.
    fn now_iso(&self) -> String;
}

/// Wall-clock implementation (UTC, RFC 3339 with microseconds).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Clock that always returns the same stamp. Intended for tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.0.clone()
    }
}
