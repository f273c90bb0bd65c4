//! Field schema model and document parsing.
//!
//! The admin API describes each plugin's configuration as a JSON document of
//! named, typed field descriptors. This module parses that loose wire shape
//! into a closed set of field kinds so every downstream operation dispatches
//! with one exhaustive match.

use serde_json::{Map, Value};

use super::SchemaError;

/// Element descriptor carried by `set` and `array` fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSchema {
    pub one_of: Option<Vec<String>>,
    pub default: Option<Value>,
    pub required: bool,
}

/// The kinds of field the console understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text {
        one_of: Option<Vec<String>>,
    },
    Number {
        between: Option<[f64; 2]>,
    },
    Integer {
        between: Option<[i64; 2]>,
    },
    Boolean,
    Set {
        elements: Option<ElementSchema>,
    },
    Array {
        elements: Option<ElementSchema>,
        one_of: Option<Vec<String>>,
    },
    Record {
        fields: Vec<FieldSchema>,
    },
    /// Reference to another entity. Never rendered, never defaulted.
    Foreign {
        reference: Option<String>,
    },
}

/// One named field descriptor in a plugin schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub required: bool,
    pub default: Option<Value>,
    pub kind: FieldKind,
}

/// A parsed schema document.
///
/// The wire shape is `{"fields": [{"<name>": {...descriptor...}}, ...]}` -
/// a list of single-key objects mapping each field name to its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub fields: Vec<FieldSchema>,
}

impl SchemaDocument {
    /// Parse a schema document from raw JSON text.
    pub fn from_str(raw: &str) -> Result<Self, SchemaError> {
        Self::from_value(&serde_json::from_str(raw)?)
    }

    /// Parse a schema document from an already-decoded JSON value.
    pub fn from_value(doc: &Value) -> Result<Self, SchemaError> {
        let root = doc.as_object().ok_or(SchemaError::NotAnObject)?;
        let list = root
            .get("fields")
            .and_then(Value::as_array)
            .ok_or(SchemaError::MissingFields)?;

        Ok(Self {
            fields: parse_field_list(list),
        })
    }

    /// The children of the root `config` record - the subtree the console
    /// edits and submits back.
    pub fn config_fields(&self) -> Option<&[FieldSchema]> {
        self.fields
            .iter()
            .find(|f| f.name == "config")
            .and_then(|f| match &f.kind {
                FieldKind::Record { fields } => Some(fields.as_slice()),
                _ => None,
            })
    }
}

/// Parse a list of field entries, skipping malformed ones.
///
/// A partial schema still renders a partial form, so a bad entry is logged
/// and dropped rather than failing the whole document.
pub fn parse_field_list(entries: &[Value]) -> Vec<FieldSchema> {
    let mut fields = Vec::with_capacity(entries.len());

    for entry in entries {
        match parse_entry(entry) {
            Some(field) => fields.push(field),
            None => tracing::warn!("Schema: skipping malformed field entry: {}", entry),
        }
    }

    fields
}

fn parse_entry(entry: &Value) -> Option<FieldSchema> {
    let map = entry.as_object()?;
    let (name, descriptor) = map.iter().next()?;
    let desc = descriptor.as_object()?;

    Some(FieldSchema {
        name: name.clone(),
        required: desc.get("required").and_then(Value::as_bool).unwrap_or(false),
        default: desc.get("default").cloned(),
        kind: parse_kind(desc)?,
    })
}

fn parse_kind(desc: &Map<String, Value>) -> Option<FieldKind> {
    let kind = match desc.get("type").and_then(Value::as_str)? {
        "number" => FieldKind::Number {
            between: parse_between_f64(desc.get("between")),
        },
        "integer" => FieldKind::Integer {
            between: parse_between_i64(desc.get("between")),
        },
        "boolean" => FieldKind::Boolean,
        "set" => FieldKind::Set {
            elements: parse_elements(desc.get("elements")),
        },
        "array" => FieldKind::Array {
            elements: parse_elements(desc.get("elements")),
            one_of: parse_one_of(desc.get("one_of")),
        },
        "record" => FieldKind::Record {
            fields: desc
                .get("fields")
                .and_then(Value::as_array)
                .map(|list| parse_field_list(list))
                .unwrap_or_default(),
        },
        "foreign" => FieldKind::Foreign {
            reference: desc
                .get("reference")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        // "string" plus anything unrecognized renders as a plain text input
        _ => FieldKind::Text {
            one_of: parse_one_of(desc.get("one_of")),
        },
    };

    Some(kind)
}

fn parse_one_of(value: Option<&Value>) -> Option<Vec<String>> {
    let list = value?.as_array()?;
    Some(
        list.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

fn parse_between_f64(value: Option<&Value>) -> Option<[f64; 2]> {
    let list = value?.as_array()?;
    Some([list.first()?.as_f64()?, list.get(1)?.as_f64()?])
}

fn parse_between_i64(value: Option<&Value>) -> Option<[i64; 2]> {
    let list = value?.as_array()?;
    Some([list.first()?.as_i64()?, list.get(1)?.as_i64()?])
}

fn parse_elements(value: Option<&Value>) -> Option<ElementSchema> {
    let desc = value?.as_object()?;
    Some(ElementSchema {
        one_of: parse_one_of(desc.get("one_of")),
        default: desc.get("default").cloned(),
        required: desc.get("required").and_then(Value::as_bool).unwrap_or(false),
    })
}
