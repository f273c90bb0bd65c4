//! Path-addressed edits on configuration trees.
//!
//! The form edits one field at a time, addressed by its chain of field names.
//! Writes copy every map level they traverse, so callers can hold the old
//! tree and the new tree side by side.

use serde_json::{Map, Value};

/// Read the value at `path`, if every intermediate node is an object.
pub fn get_at_path<'a, S: AsRef<str>>(
    root: &'a Map<String, Value>,
    path: &[S],
) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = root.get(first.as_ref())?;

    for segment in rest {
        current = current.as_object()?.get(segment.as_ref())?;
    }

    Some(current)
}

/// Write `value` at `path`, copying each traversed level.
///
/// `Some(v)` sets the final segment; `None` removes it (an optional field
/// cleared by the form). Intermediate nodes that are missing or not objects
/// are replaced by empty objects on the way down. An empty path is a no-op
/// returning the root unchanged.
pub fn update_at_path<S: AsRef<str>>(
    root: &Map<String, Value>,
    path: &[S],
    value: Option<Value>,
) -> Map<String, Value> {
    let Some((head, rest)) = path.split_first() else {
        return root.clone();
    };

    let mut out = root.clone();

    if rest.is_empty() {
        match value {
            Some(v) => {
                out.insert(head.as_ref().to_string(), v);
            }
            None => {
                out.remove(head.as_ref());
            }
        }
        return out;
    }

    let child = match out.get(head.as_ref()).and_then(Value::as_object) {
        Some(map) => map.clone(),
        None => Map::new(),
    };

    out.insert(
        head.as_ref().to_string(),
        Value::Object(update_at_path(&child, rest, value)),
    );
    out
}
