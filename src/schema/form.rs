//! Form planning and input coercion.
//!
//! Decides, per schema field, which control the console should render and
//! how a raw UI event on that control becomes a stored value. The output is
//! plain data so any rendering layer can consume it.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::field::{ElementSchema, FieldKind, FieldSchema};

/// One planned form control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormControl {
    /// Field-name chain from the config root, for `update_at_path`.
    pub path: Vec<String>,
    pub label: String,
    /// Advisory only - nothing in this layer enforces it.
    pub required: bool,
    pub widget: Widget,
}

/// The input affordance for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Toggle {
        on: bool,
    },
    IntegerInput {
        value: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
    },
    NumberInput {
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    SingleSelect {
        options: Vec<String>,
        selected: String,
        /// Optional fields get an empty choice to deselect with.
        allow_clear: bool,
    },
    MultiSelect {
        options: Vec<String>,
        selected: Vec<String>,
    },
    TextInput {
        value: String,
    },
    /// Free-form list entered as comma-separated text.
    CsvInput {
        value: String,
    },
    Group {
        children: Vec<FormControl>,
    },
    /// A record with no child fields - rendered as a "no fields" placeholder.
    EmptyGroup,
}

/// A raw event from a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Text(String),
    Choices(Vec<String>),
    Toggle(bool),
}

/// Plan the control tree for a schema and its current configuration value.
pub fn plan_form(fields: &[FieldSchema], value: &Map<String, Value>) -> Vec<FormControl> {
    plan_at(fields, value, &[])
}

fn plan_at(
    fields: &[FieldSchema],
    value: &Map<String, Value>,
    base: &[String],
) -> Vec<FormControl> {
    let mut controls = Vec::with_capacity(fields.len());

    for field in fields {
        let current = value.get(&field.name);

        let widget = match &field.kind {
            FieldKind::Record { fields: children } => {
                if children.is_empty() {
                    Widget::EmptyGroup
                } else {
                    let mut path = base.to_vec();
                    path.push(field.name.clone());
                    let child_value = current
                        .and_then(Value::as_object)
                        .cloned()
                        .unwrap_or_default();
                    Widget::Group {
                        children: plan_at(children, &child_value, &path),
                    }
                }
            }
            FieldKind::Set { elements } => Widget::MultiSelect {
                options: element_options(elements),
                selected: selected_strings(current),
            },
            FieldKind::Boolean => Widget::Toggle {
                on: current.and_then(Value::as_bool).unwrap_or(false),
            },
            FieldKind::Integer { between } => Widget::IntegerInput {
                value: current.and_then(Value::as_i64),
                min: between.map(|b| b[0]),
                max: between.map(|b| b[1]),
            },
            FieldKind::Number { between } => Widget::NumberInput {
                value: current.and_then(Value::as_f64),
                min: between.map(|b| b[0]),
                max: between.map(|b| b[1]),
            },
            FieldKind::Array { elements, one_of } => match array_options(elements, one_of) {
                Some(options) => Widget::MultiSelect {
                    options,
                    selected: selected_strings(current),
                },
                None => Widget::CsvInput {
                    value: selected_strings(current).join(","),
                },
            },
            FieldKind::Text { one_of } => match one_of {
                Some(options) => Widget::SingleSelect {
                    options: options.clone(),
                    selected: current
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    allow_clear: !field.required,
                },
                None => Widget::TextInput {
                    value: current
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                },
            },
            FieldKind::Foreign { .. } => continue,
        };

        let mut path = base.to_vec();
        path.push(field.name.clone());

        controls.push(FormControl {
            path,
            label: field.name.clone(),
            required: field.required,
            widget,
        });
    }

    controls
}

/// Coerce a raw control event into the value to store at the field's path.
///
/// Returns `None` when the key should be cleared instead: an optional numeric
/// field whose input is empty or unparseable. Required numerics fall back to
/// zero in the same situation. Container and foreign fields never take direct
/// input, so any event on them coerces to `None` as well.
pub fn coerce_input(field: &FieldSchema, input: &RawInput) -> Option<Value> {
    match (&field.kind, input) {
        (FieldKind::Boolean, RawInput::Toggle(on)) => Some(Value::Bool(*on)),
        (FieldKind::Boolean, RawInput::Text(raw)) => Some(Value::Bool(raw.trim() == "true")),
        (FieldKind::Integer { .. }, RawInput::Text(raw)) => match raw.trim().parse::<i64>() {
            Ok(n) => Some(json!(n)),
            Err(_) if field.required => Some(json!(0)),
            Err(_) => None,
        },
        (FieldKind::Number { .. }, RawInput::Text(raw)) => match raw.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => Some(json!(x)),
            _ if field.required => Some(json!(0)),
            _ => None,
        },
        (FieldKind::Set { .. } | FieldKind::Array { .. }, RawInput::Choices(picked)) => {
            Some(json!(picked))
        }
        (FieldKind::Array { .. }, RawInput::Text(raw)) => {
            let parts: Vec<&str> = raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            Some(json!(parts))
        }
        (FieldKind::Text { .. }, RawInput::Text(raw)) => Some(Value::String(raw.clone())),
        _ => None,
    }
}

fn element_options(elements: &Option<ElementSchema>) -> Vec<String> {
    elements
        .as_ref()
        .and_then(|e| e.one_of.clone())
        .unwrap_or_default()
}

/// Array enumerations may sit on the element descriptor or on the field
/// itself; the element descriptor wins.
fn array_options(
    elements: &Option<ElementSchema>,
    one_of: &Option<Vec<String>>,
) -> Option<Vec<String>> {
    elements
        .as_ref()
        .and_then(|e| e.one_of.clone())
        .or_else(|| one_of.clone())
}

fn selected_strings(current: Option<&Value>) -> Vec<String> {
    current
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
