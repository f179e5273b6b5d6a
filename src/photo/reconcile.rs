//! Server-side normalization of incoming photo payloads.
//!
//! Every property update with a photo payload passes through here before it
//! is written, and the read side runs the same normalization so nothing
//! downstream ever sees the legacy keyed-map shape.

use std::cmp::Ordering;

use entity::{Featured, Photo, PropertyStatus};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{mint_code, renumber};

/// Raised only for payloads that are not a recognized shape at all; array
/// and keyed-map payloads are normalized best-effort instead. No partial
/// result is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("invalid photo payload: expected an array or a keyed map, found {found}")]
    InvalidPhotoPayload { found: &'static str },
}

// Wire fields with dedicated `Photo` fields; everything else is `extra`.
const MODELLED_FIELDS: &[&str] = &["Codigo", "Foto", "Destaque", "ordem"];

// Editing-session markers that must never reach storage.
const TRANSIENT_FIELDS: &[&str] = &["_markedForDeletion", "batchSignature"];

/// Normalize a raw `Foto` payload into the canonical, contiguously ordered
/// array handed to storage.
///
/// Accepts the current array shape or the legacy map keyed by position
/// (`{"1": {...}, "2": {...}}`). Entries keep their incoming `ordem` when it
/// is an integer >= 0 and fall back to their position otherwise; the result
/// is sorted and renumbered so the stored order is always the 0..N
/// permutation. Sold properties get their first photo promoted to cover.
#[tracing::instrument(name = "Reconciling photo payload", level = "debug", skip(raw))]
pub fn reconcile(raw: &Value, status: &PropertyStatus) -> Result<Vec<Photo>, PayloadError> {
    let entries = collect_entries(raw)?;

    let mut photos: Vec<Photo> = entries
        .iter()
        .enumerate()
        .filter(|(_, (_, entry))| !marked_for_deletion(entry))
        .map(|(index, (key, entry))| photo_from_entry(entry, key.as_deref(), index))
        .collect();

    photos.sort_by_key(|p| p.order);
    renumber(&mut photos);

    if status.is_sold() {
        if let Some(first) = photos.first_mut() {
            if !first.featured.is_featured() {
                tracing::debug!(code = %first.code, "Promoting first photo of sold property to cover");
                first.featured = Featured::Sim;
            }
        }
    }

    tracing::debug!(total = photos.len(), "Photo payload reconciled");
    Ok(photos)
}

type Entry = (Option<String>, Map<String, Value>);

fn collect_entries(raw: &Value) -> Result<Vec<Entry>, PayloadError> {
    match raw {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::Object(entry) => Some((None, entry.clone())),
                other => {
                    tracing::warn!("Skipping non-object photo entry: {other}");
                    None
                }
            })
            .collect()),
        Value::Object(map) => {
            // Legacy shape: iteration order after a numeric sort of the keys
            // becomes the positional fallback, and the key wins over any
            // `Codigo` inside the entry.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            Ok(entries
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::Object(entry) => Some((Some(key.clone()), entry.clone())),
                    other => {
                        tracing::warn!("Skipping non-object photo entry under key {key}: {other}");
                        None
                    }
                })
                .collect())
        }
        other => Err(PayloadError::InvalidPhotoPayload {
            found: json_type(other),
        }),
    }
}

fn photo_from_entry(entry: &Map<String, Value>, key: Option<&str>, index: usize) -> Photo {
    let code = key
        .map(str::to_owned)
        .or_else(|| {
            entry
                .get("Codigo")
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| mint_code(index));
    let url = entry
        .get("Foto")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let featured = entry
        .get("Destaque")
        .and_then(Value::as_str)
        .map(|s| s.parse::<Featured>().unwrap_or_default())
        .unwrap_or_default();
    let order = entry
        .get("ordem")
        .and_then(Value::as_u64)
        .and_then(|o| u32::try_from(o).ok())
        .unwrap_or(index as u32);

    let extra: Map<String, Value> = entry
        .iter()
        .filter(|(field, value)| {
            !MODELLED_FIELDS.contains(&field.as_str())
                && !TRANSIENT_FIELDS.contains(&field.as_str())
                && !is_placeholder(value)
        })
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect();

    Photo {
        code,
        url,
        featured,
        order: Some(order),
        extra,
    }
}

// Placeholders are dropped rather than persisted.
fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn marked_for_deletion(entry: &Map<String, Value>) -> bool {
    entry.get("_markedForDeletion").is_some_and(truthy)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
