//! Coercion of untrusted import payloads into well-formed notes.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::models::{Note, NoteId, DEFAULT_NOTE_COLOR};
use crate::util::parse_timestamp;

/// Sanitize every importable element, dropping anything without a string id.
///
/// Later elements repeating an id already seen are dropped as well.
pub fn sanitize_collection(items: Vec<Value>, now: &str) -> Vec<Note> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| sanitize_note(item, now))
        .filter(|note| {
            let fresh = seen.insert(note.id.clone());
            if !fresh {
                tracing::debug!(id = %note.id, "dropping repeated id from import");
            }
            fresh
        })
        .collect()
}

fn sanitize_note(item: Value, now: &str) -> Option<Note> {
    let Value::Object(mut fields) = item else {
        return None;
    };
    let Some(Value::String(id)) = fields.remove("id") else {
        return None;
    };

    let created_at = truthy_string(&fields, "createdAt").unwrap_or_else(|| now.to_string());
    let mut updated_at = truthy_string(&fields, "updatedAt").unwrap_or_else(|| now.to_string());
    if let (Some(created), Some(updated)) = (parse_timestamp(&created_at), parse_timestamp(&updated_at)) {
        if updated < created {
            updated_at.clone_from(&created_at);
        }
    }

    let tags = match fields.get("tags") {
        Some(Value::Array(tags)) => tags.iter().map(coerce_to_string).collect(),
        _ => Vec::new(),
    };

    Some(Note {
        id: NoteId::from(id),
        title: string_or_empty(&fields, "title"),
        content: string_or_empty(&fields, "content"),
        created_at,
        updated_at,
        pinned: fields.get("pinned").is_some_and(is_truthy),
        archived: fields.get("archived").is_some_and(is_truthy),
        tags,
        category: truthy_string(&fields, "category"),
        color: truthy_string(&fields, "color").unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string()),
        due_date: truthy_string(&fields, "dueDate"),
    })
}

/// The field coerced to a string, or `""` when missing or null.
fn string_or_empty(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => coerce_to_string(value),
    }
}

/// The field coerced to a string when it is truthy.
fn truthy_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .filter(|value| is_truthy(value))
        .map(coerce_to_string)
}

/// Truthiness as the exporting app understood it: `false`, `0`, `""` and
/// `null` are falsy, everything else (including empty arrays) is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings verbatim, scalars via their display form, containers as compact JSON.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
