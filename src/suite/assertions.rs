//! Response-shape predicates shared by the checks.
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;

const HEALTH_FIELDS: [&str; 3] = ["status", "timestamp", "service"];
const MODEL_FIELDS: [&str; 3] = ["id", "object", "owned_by"];
const OPENAI_MODEL_FIELDS: [&str; 4] = ["id", "object", "created", "owned_by"];
const CORS_HEADERS: [&str; 2] = ["access-control-allow-origin", "access-control-allow-methods"];

fn has_fields(value: &Value, fields: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|object| fields.iter().all(|field| object.contains_key(*field)))
}

/// `{status: "ok", timestamp, service}`.
#[must_use]
pub fn health_body_is_valid(body: &Value) -> bool {
    has_fields(body, &HEALTH_FIELDS) && body.get("status").and_then(Value::as_str) == Some("ok")
}

/// `{object: "list", data: [...]}` with a non-empty `data` whose first
/// element carries `id`, `object` and `owned_by`.
#[must_use]
pub fn models_body_is_valid(body: &Value) -> bool {
    if body.get("object").and_then(Value::as_str) != Some("list") {
        return false;
    }
    body.get("data")
        .and_then(Value::as_array)
        .and_then(|models| models.first())
        .is_some_and(|first| has_fields(first, &MODEL_FIELDS))
}

/// Every listed model has `id`, `object`, `created`, `owned_by` and
/// `object == "model"`. An empty list passes.
#[must_use]
pub fn models_are_openai_compatible(body: &Value) -> bool {
    if body.get("object").and_then(Value::as_str) != Some("list") {
        return false;
    }
    let Some(models) = body.get("data").and_then(Value::as_array) else {
        return false;
    };
    models.iter().all(|model| {
        has_fields(model, &OPENAI_MODEL_FIELDS)
            && model.get("object").and_then(Value::as_str) == Some("model")
    })
}

#[must_use]
pub fn has_cors_headers(headers: &HeaderMap) -> bool {
    CORS_HEADERS.iter().all(|name| headers.contains_key(*name))
}

#[must_use]
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

#[must_use]
pub const fn is_not_found(status: u16) -> bool {
    status == 404
}

#[must_use]
pub const fn is_ok_status(status: u16) -> bool {
    status == 200
}

#[must_use]
pub fn within_latency(elapsed: Duration, budget: Duration) -> bool {
    elapsed < budget
}
