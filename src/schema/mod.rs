//! Schema-driven configuration engine.
//!
//! Interprets the gateway's declarative plugin field schemas: defaulting a
//! partial configuration, applying path-addressed edits, and planning the
//! form controls a UI should render for a schema/value pair.

mod defaults;
mod field;
mod form;
mod path;

pub use defaults::*;
pub use field::*;
pub use form::*;
pub use path::*;

use thiserror::Error;

/// Schema document error types.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema document is not an object")]
    NotAnObject,
    #[error("schema document has no `fields` list")]
    MissingFields,
}
