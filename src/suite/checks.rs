//! The individual suite checks. Each returns `Ok(false)` when the server
//! answered but the response did not match.
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::time::sleep;

use super::assertions::{
    has_cors_headers, health_body_is_valid, is_json_content_type, is_not_found, is_ok_status,
    models_are_openai_compatible, models_body_is_valid, within_latency,
};
use crate::args::{Percent, PositiveUsize};
use crate::error::AppResult;
use crate::http::ApiClient;
use crate::load::{BatchPlan, all_succeed, batched_successes, required_successes};

pub(crate) const HEALTH_PATH: &str = "/health";
pub(crate) const MODELS_PATH: &str = "/v1/models";
pub(crate) const MISSING_PATH: &str = "/nonexistent";

/// # Errors
///
/// Returns an error when the request fails or the body is not JSON.
pub async fn health_endpoint(client: &ApiClient) -> AppResult<bool> {
    let response = client.get(HEALTH_PATH).await?;
    if !is_ok_status(response.status().as_u16()) {
        return Ok(false);
    }
    let body: Value = response.json().await?;
    Ok(health_body_is_valid(&body))
}

/// # Errors
///
/// Returns an error when the request fails or the body is not JSON.
pub async fn models_endpoint(client: &ApiClient) -> AppResult<bool> {
    let response = client.get(MODELS_PATH).await?;
    if !is_ok_status(response.status().as_u16()) {
        return Ok(false);
    }
    let body: Value = response.json().await?;
    Ok(models_body_is_valid(&body))
}

/// # Errors
///
/// Returns an error when the request fails.
pub async fn unknown_path_is_404(client: &ApiClient) -> AppResult<bool> {
    let response = client.get(MISSING_PATH).await?;
    Ok(is_not_found(response.status().as_u16()))
}

/// # Errors
///
/// Returns an error when the request fails.
pub async fn cors_headers(client: &ApiClient) -> AppResult<bool> {
    let response = client.get(HEALTH_PATH).await?;
    Ok(has_cors_headers(response.headers()))
}

/// # Errors
///
/// Returns an error when the request fails.
pub async fn options_preflight(client: &ApiClient) -> AppResult<bool> {
    let response = client.options(HEALTH_PATH).await?;
    Ok(is_ok_status(response.status().as_u16()))
}

/// # Errors
///
/// Returns an error when the request fails.
pub async fn json_content_type(client: &ApiClient) -> AppResult<bool> {
    let response = client.get(HEALTH_PATH).await?;
    Ok(is_json_content_type(response.headers()))
}

/// Times one full `/health` round trip, body included.
///
/// # Errors
///
/// Returns an error when the request or body read fails.
pub async fn response_time(client: &ApiClient, budget: Duration) -> AppResult<bool> {
    let started = Instant::now();
    let response = client.get(HEALTH_PATH).await?;
    let status = response.status().as_u16();
    let _body = response.bytes().await?;
    let elapsed = started.elapsed();
    tracing::debug!("/health answered in {:?} (budget {:?})", elapsed, budget);
    Ok(is_ok_status(status) && within_latency(elapsed, budget))
}

/// # Errors
///
/// Returns an error when any of the requests fails.
pub async fn concurrent_requests(
    client: &ApiClient,
    count: PositiveUsize,
    width: PositiveUsize,
) -> AppResult<bool> {
    all_succeed(client, HEALTH_PATH, count, width).await
}

/// Sends `count` requests one after another on the same client.
///
/// # Errors
///
/// Returns an error when any of the requests fails.
pub async fn persistent_connection(
    client: &ApiClient,
    count: PositiveUsize,
    pacing: Duration,
) -> AppResult<bool> {
    let mut all_ok = true;
    for index in 0..count.get() {
        if index > 0 {
            sleep(pacing).await;
        }
        let response = client.get(HEALTH_PATH).await?;
        all_ok &= is_ok_status(response.status().as_u16());
    }
    Ok(all_ok)
}

/// # Errors
///
/// Returns an error when a batch worker panicked.
pub async fn large_concurrent_load(
    client: &ApiClient,
    plan: BatchPlan,
    success_percent: Percent,
) -> AppResult<bool> {
    let successes = batched_successes(client, HEALTH_PATH, plan).await?;
    let required = required_successes(plan.total_requests(), success_percent.get());
    tracing::debug!(
        "Load check: {}/{} succeeded, {} required",
        successes,
        plan.total_requests(),
        required
    );
    Ok(successes >= required)
}

/// # Errors
///
/// Returns an error when the request fails or the body is not JSON.
pub async fn openai_compatibility(client: &ApiClient) -> AppResult<bool> {
    let response = client.get(MODELS_PATH).await?;
    if !is_ok_status(response.status().as_u16()) {
        return Ok(false);
    }
    let body: Value = response.json().await?;
    Ok(models_are_openai_compatible(&body))
}
