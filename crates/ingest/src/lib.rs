//! Ingestion normalizer for eventline.
//!
//! Turns a raw submission in one of two declared encodings into zero
//! or more validated `EventRecord`s, or rejects the submission. The
//! encoding is an explicit `ContentKind` passed by the transport
//! layer; the normalizer never inspects wire-level headers itself.

pub mod normalize;

pub use normalize::{normalize, ContentKind};
