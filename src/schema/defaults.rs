//! Configuration defaulting.
//!
//! Synthesizes a fully-populated configuration object from a field schema
//! and a possibly-partial stored value, so the form always has something to
//! display for every non-foreign field.

use serde_json::{json, Map, Value};

use super::field::{FieldKind, FieldSchema};

/// The value a field takes when the stored configuration lacks it.
///
/// An explicit schema `default` wins; otherwise each kind has a fixed zero
/// value. Total over every kind.
pub fn default_for_field(field: &FieldSchema) -> Value {
    if let Some(value) = &field.default {
        return value.clone();
    }

    match &field.kind {
        FieldKind::Set { elements } => elements
            .as_ref()
            .and_then(|e| e.default.clone())
            .unwrap_or_else(|| Value::Array(Vec::new())),
        FieldKind::Record { .. } => Value::Object(Map::new()),
        FieldKind::Array { .. } => Value::Array(Vec::new()),
        FieldKind::Integer { .. } | FieldKind::Number { .. } => json!(0),
        FieldKind::Boolean => Value::Bool(false),
        FieldKind::Text { .. } | FieldKind::Foreign { .. } => Value::String(String::new()),
    }
}

/// Fill every missing key of `current` with its schema default.
///
/// Record fields with children are always re-normalized recursively, whether
/// or not they pre-existed, since their children may need defaults of their
/// own. Foreign fields are never surfaced. The input map is not modified;
/// each touched level is copied. Idempotent.
pub fn apply_defaults(fields: &[FieldSchema], current: &Map<String, Value>) -> Map<String, Value> {
    let mut out = current.clone();

    for field in fields {
        if let FieldKind::Foreign { .. } = field.kind {
            continue;
        }

        if !out.contains_key(&field.name) {
            out.insert(field.name.clone(), default_for_field(field));
        }

        if let FieldKind::Record { fields: children } = &field.kind {
            if !children.is_empty() {
                let existing = out
                    .get(&field.name)
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                out.insert(
                    field.name.clone(),
                    Value::Object(apply_defaults(children, &existing)),
                );
            }
        }
    }

    out
}
