//! Payload shaping
//!
//! Every payload leaving the orchestrator carries its collection field as an
//! array, so a UI panel can always iterate it.

use serde_json::{Map, Value};

use crate::error::FetchError;

/// Validates an upstream success body and fills a missing collection.
///
/// Non-object bodies, and collection fields that are neither an array nor
/// null, are malformed.
pub fn normalize_success(body: Option<Value>, field: &str) -> Result<Value, FetchError> {
    let mut object = match body {
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(FetchError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
        None => {
            return Err(FetchError::MalformedResponse(
                "response body is not JSON".to_string(),
            ))
        }
    };

    match object.get(field) {
        None | Some(Value::Null) => {
            object.insert(field.to_string(), Value::Array(Vec::new()));
        }
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(FetchError::MalformedResponse(format!(
                "field '{field}' should be an array, got {}",
                type_name(other)
            )))
        }
    }

    Ok(Value::Object(object))
}

/// Soft-error payload: `{ error, errorCode, message, <field>: [] }`.
pub fn error_payload(err: &FetchError, field: &str) -> Value {
    let mut object = Map::new();
    object.insert("error".to_string(), Value::from(err.to_string()));
    object.insert("errorCode".to_string(), Value::from(err.error_code()));
    object.insert("message".to_string(), Value::from(err.user_message()));
    object.insert(field.to_string(), Value::Array(Vec::new()));
    Value::Object(object)
}

/// Empty result used when nothing else can be served.
pub fn placeholder(err: &FetchError, field: &str) -> Value {
    let mut object = match error_payload(err, field) {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    object.insert("count".to_string(), Value::from(0));
    object.insert("placeholder".to_string(), Value::Bool(true));
    Value::Object(object)
}

/// Upstream's own error message, if the body carries one.
pub fn upstream_message(body: Option<&Value>, status: u16) -> String {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("API Error: {status}"))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
