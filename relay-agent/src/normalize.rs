//! Normalization of tool arguments and results at the model boundary.

use relay_core::{RelayError, Result};
use serde_json::{Value, json};

/// Decode the argument payload of a tool-use request.
///
/// Models usually emit a structured object, but the payload may arrive
/// as a JSON-encoded string, or be absent entirely. Absent means an
/// empty mapping; anything else is passed through for the catalog to
/// validate.
pub fn decode_args(input: &Value) -> Result<Value> {
    match input {
        Value::Null => Ok(json!({})),
        Value::String(encoded) => serde_json::from_str(encoded)
            .map_err(|e| RelayError::Agent(format!("tool arguments were not valid JSON: {e}"))),
        other => Ok(other.clone()),
    }
}

/// Fold an arbitrary tool result into a JSON object for the tool-result
/// content block: mappings pass through, sequences are wrapped under
/// `items`, everything else (including null) under `result`.
pub fn objectify(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        Value::Array(_) => json!({ "items": value }),
        scalar => json!({ "result": scalar }),
    }
}
