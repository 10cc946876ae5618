use serde_json::{Map, Value};
use tracing::{debug, warn};

pub(crate) type JsonObject = Map<String, Value>;

/// The object stored at `key`, or `None` if the key is absent or holds
/// something else.
pub(crate) fn object_at<'a>(parent: &'a JsonObject, key: &str) -> Option<&'a JsonObject> {
    match parent.get(key)? {
        Value::Object(object) => Some(object),
        other => {
            warn!(key, kind = kind_of(other), "expected an object, ignoring value");
            None
        }
    }
}

/// The objects of the array stored at `key`. Non-object entries are dropped.
/// Returns `None` if the key is absent or does not hold an array.
pub(crate) fn object_array_at(parent: &JsonObject, key: &str) -> Option<Vec<JsonObject>> {
    let items = match parent.get(key)? {
        Value::Array(items) => items,
        Value::Null => return None,
        other => {
            warn!(key, kind = kind_of(other), "expected an array, ignoring value");
            return None;
        }
    };
    let objects: Vec<JsonObject> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(object) => Some(object.clone()),
            _ => None,
        })
        .collect();
    if objects.len() != items.len() {
        warn!(
            key,
            dropped = items.len() - objects.len(),
            "dropped non-object entries"
        );
    }
    Some(objects)
}

/// Whether `key` holds an array, regardless of its contents.
pub(crate) fn has_array_at(parent: &JsonObject, key: &str) -> bool {
    matches!(parent.get(key), Some(Value::Array(_)))
}

/// Probes `keys` in priority order and returns the first string value.
pub(crate) fn first_string(parent: &JsonObject, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|&key| match parent.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            warn!(key, kind = kind_of(other), "expected a string, trying next key");
            None
        }
    })
}

/// Probes `keys` in priority order and returns the first array of objects.
pub(crate) fn first_object_array(parent: &JsonObject, keys: &[&str]) -> Option<Vec<JsonObject>> {
    keys.iter().find_map(|&key| object_array_at(parent, key))
}

/// Reads the integer status code. Integers encoded as strings are accepted;
/// anything else is treated as missing.
pub(crate) fn status_code(document: &JsonObject) -> Option<i64> {
    match document.get("status")? {
        Value::Number(n) => n.as_i64().or_else(|| {
            warn!(status = %n, "status is not an integer");
            None
        }),
        Value::String(s) => s.trim().parse().ok().or_else(|| {
            warn!(status = %s, "status string is not an integer");
            None
        }),
        other => {
            debug!(kind = kind_of(other), "status has no usable value");
            None
        }
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
