//! Shared helpers for the DirectStay tool wrappers.

use serde_json::{Value, json};

use crate::domains::tools::descriptor::JsonObject;

/// Soft-error payload delivered to the caller as ordinary tool output.
pub fn soft_error(message: &str) -> Value {
    json!({ "error": message })
}

/// Copy the listed keys out of the argument map, skipping absent ones.
///
/// Request bodies carry exactly the declared parameters present in the
/// call; absent optional parameters are omitted rather than sent as null.
pub fn pick(args: &JsonObject, keys: &[&str]) -> Value {
    let mut body = JsonObject::new();
    for key in keys {
        if let Some(value) = args.get(*key) {
            body.insert((*key).to_string(), value.clone());
        }
    }
    Value::Object(body)
}

/// Render an argument as a URL path segment.
///
/// Strings pass through unquoted; other shapes serialize compactly.
pub fn path_segment(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Render an argument as a query parameter, falling back to a default
/// when the key is absent.
pub fn query_value(args: &JsonObject, key: &str, default: &str) -> String {
    match args.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => default.to_string(),
    }
}
