use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding the JSON wire shape of a document
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Unsupported children value: expected array, string or object, got {0}")]
    UnsupportedChildren(&'static str),

    #[error("Invalid editable field: {0}")]
    InvalidField(String),

    #[error("Invalid field path: {0:?}")]
    InvalidPath(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Short name of a JSON value's kind, for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
