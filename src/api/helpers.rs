//! Response builders for the HTTP-style Lambda result.

use serde_json::{Value, json};

/// Shown to callers for any upstream failure; the detail goes to the logs.
pub const FAILURE_MESSAGE: &str = "Failed to create poll or send notification";

/// Returns a 200 OK response with `{ message, data }` and an optional warning.
#[must_use]
pub fn ok_response(message: &str, data: &Value, warning: Option<&str>) -> Value {
    let mut body = json!({ "message": message, "data": data });
    if let Some(w) = warning {
        body["warning"] = json!(w);
    }
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}
