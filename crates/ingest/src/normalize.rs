//! Validation and normalization of raw submissions.
//!
//! Two encodings are supported, selected by `ContentKind`:
//!
//! - **Json**: a single object or an array of objects. Objects are
//!   checked for *key presence* of the three required fields, never
//!   for value type or emptiness. A single object missing a field is
//!   a hard `Error::Validation`; in an array the same defect silently
//!   drops that one element. The asymmetry is preserved source
//!   behavior, not an oversight.
//! - **Text**: newline-separated lines, whitespace-tokenized. Lines
//!   with at least three tokens map positionally to `user_id`,
//!   `event_type`, `event_timestamp` (further tokens ignored); shorter
//!   lines are skipped without error.
//!
//! Every accepted record is stamped with `added_at` from the clock.

use eventline_core::{Clock, Error, EventRecord, Result, REQUIRED_FIELDS};
use serde_json::{Map, Value};

/// Declared encoding of a submission.
///
/// The transport layer picks the variant; arbitrary header strings go
/// through [`ContentKind::from_label`], which is where unrecognized
/// kinds are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Structured form: one JSON object or an array of them.
    Json,
    /// Line-oriented text form.
    Text,
}

impl ContentKind {
    /// Map a wire-level content-type label to a kind.
    ///
    /// Media-type parameters (`; charset=...`) are ignored. Anything
    /// other than `application/json` or `text/plain` is rejected with
    /// `Error::UnsupportedFormat`.
    pub fn from_label(label: &str) -> Result<Self> {
        let media_type = label.split(';').next().unwrap_or_default().trim();
        match media_type {
            "application/json" => Ok(ContentKind::Json),
            "text/plain" => Ok(ContentKind::Text),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Normalize one submission into validated records.
///
/// Returns the accepted records in submission order; the list may be
/// empty (a batch or text payload where nothing validated). Errors
/// reject the whole submission and nothing is appended.
pub fn normalize(kind: ContentKind, payload: &str, clock: &dyn Clock) -> Result<Vec<EventRecord>> {
    let records = match kind {
        ContentKind::Json => normalize_json(payload, clock)?,
        ContentKind::Text => normalize_text(payload, clock),
    };
    tracing::debug!(kind = ?kind, accepted = records.len(), "normalized submission");
    Ok(records)
}

fn normalize_json(payload: &str, clock: &dyn Clock) -> Result<Vec<EventRecord>> {
    let value: Value = serde_json::from_str(payload).map_err(|err| Error::MalformedInput {
        kind: "json",
        reason: err.to_string(),
    })?;

    match value {
        // Batch: malformed elements are dropped, not rejected.
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => record_from_object(map, clock),
                _ => None,
            })
            .collect()),
        // Single object: missing fields reject the whole submission.
        Value::Object(map) => {
            let missing = missing_fields(&map);
            if !missing.is_empty() {
                return Err(Error::Validation { missing });
            }
            // Presence was just checked, so this always yields a record.
            Ok(record_from_object(map, clock).into_iter().collect())
        }
        other => Err(Error::MalformedInput {
            kind: "json",
            reason: format!("expected object or array, got {}", json_type_name(&other)),
        }),
    }
}

fn normalize_text(payload: &str, clock: &dyn Clock) -> Vec<EventRecord> {
    payload
        .lines()
        .filter_map(|line| record_from_line(line, clock))
        .collect()
}

/// Required-field names absent from the object.
fn missing_fields(map: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !map.contains_key(*field))
        .collect()
}

/// Build a record from a structured object, or `None` if a required
/// key is absent.
///
/// Remaining fields pass through verbatim as extras. A caller-supplied
/// `added_at` is discarded: the stamp is always server-assigned.
fn record_from_object(mut map: Map<String, Value>, clock: &dyn Clock) -> Option<EventRecord> {
    let user_id = field_text(map.remove("user_id")?);
    let event_type = field_text(map.remove("event_type")?);
    let event_timestamp = field_text(map.remove("event_timestamp")?);
    map.remove("added_at");
    Some(
        EventRecord::new(user_id, event_type, event_timestamp, clock.now_iso()).with_extra(map),
    )
}

/// Build a record from one text line, or `None` for blank or short lines.
fn record_from_line(line: &str, clock: &dyn Clock) -> Option<EventRecord> {
    let mut tokens = line.split_whitespace();
    let user_id = tokens.next()?;
    let event_type = tokens.next()?;
    let event_timestamp = tokens.next()?;
    // Tokens beyond the third are ignored.
    Some(EventRecord::new(
        user_id,
        event_type,
        event_timestamp,
        clock.now_iso(),
    ))
}

/// String form of a required-field value.
///
/// Presence alone validates; non-string values are kept as their
/// compact JSON text rather than rejected.
fn field_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
