//! Error types for ingestion and persistence.
//!
//! Three error kinds are caller-facing and identify the rejected
//! field or payload; none are retried internally. Snapshot *load*
//! corruption is not represented here at all: the store recovers from
//! it locally by starting empty (see `eventline-store`).

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A single-object structured submission is missing required fields.
    ///
    /// Batch submissions never produce this error: malformed elements
    /// are dropped silently instead. The asymmetry is deliberate and
    /// matches the observed source behavior.
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation {
        /// Names of the absent required fields.
        missing: Vec<&'static str>,
    },

    /// The declared content kind is not one the normalizer understands.
    #[error("unsupported content type: {0}")]
    UnsupportedFormat(String),

    /// The payload could not be parsed under the declared content kind.
    #[error("malformed {kind} payload: {reason}")]
    MalformedInput {
        /// The declared kind ("json" or "text").
        kind: &'static str,
        /// Parser detail identifying the failure.
        reason: String,
    },

    /// Writing the snapshot after a mutation failed.
    ///
    /// Surfaced from the mutating call; the in-memory sequence keeps
    /// the appended records (mutate-then-save ordering).
    #[error("snapshot persistence failed: {0}")]
    Snapshot(#[source] std::io::Error),
}
