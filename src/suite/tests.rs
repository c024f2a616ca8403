use super::*;
use crate::error::{AppError, HttpError};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;
use std::future::Future;
use std::time::{Duration, Instant};
use url::Url;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn closed_port_client() -> Result<ApiClient, String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind failed: {}", err))?;
    let port = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?
        .port();
    drop(listener);
    let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).map_err(|err| err.to_string())?;
    ApiClient::new(url, Duration::from_millis(500)).map_err(|err| err.to_string())
}

#[test]
fn health_body_requires_fields_and_ok_status() -> Result<(), String> {
    let good = json!({"status": "ok", "timestamp": "2024-01-01T00:00:00", "service": "GPT4All Local API"});
    if !health_body_is_valid(&good) {
        return Err("Expected valid health body".to_owned());
    }
    let degraded = json!({"status": "degraded", "timestamp": 1, "service": "x"});
    if health_body_is_valid(&degraded) {
        return Err("Expected non-ok status to fail".to_owned());
    }
    let missing = json!({"status": "ok", "service": "x"});
    if health_body_is_valid(&missing) {
        return Err("Expected missing timestamp to fail".to_owned());
    }
    if health_body_is_valid(&json!(["status", "timestamp", "service"])) {
        return Err("Expected array body to fail".to_owned());
    }
    Ok(())
}

#[test]
fn models_body_checks_first_entry() -> Result<(), String> {
    let good = json!({"object": "list", "data": [{"id": "m1", "object": "model", "owned_by": "x"}]});
    if !models_body_is_valid(&good) {
        return Err("Expected valid models body".to_owned());
    }
    let empty = json!({"object": "list", "data": []});
    if models_body_is_valid(&empty) {
        return Err("Expected empty data to fail".to_owned());
    }
    let wrong_object = json!({"object": "models", "data": [{"id": "m1", "object": "model", "owned_by": "x"}]});
    if models_body_is_valid(&wrong_object) {
        return Err("Expected object != list to fail".to_owned());
    }
    let missing_owner = json!({"object": "list", "data": [{"id": "m1", "object": "model"}]});
    if models_body_is_valid(&missing_owner) {
        return Err("Expected missing owned_by to fail".to_owned());
    }
    Ok(())
}

#[test]
fn openai_compatibility_accepts_model_objects() -> Result<(), String> {
    let good = json!({"object": "list", "data": [{"id": "m1", "object": "model", "created": 0, "owned_by": "x"}]});
    if !models_are_openai_compatible(&good) {
        return Err("Expected compatible listing".to_owned());
    }
    let not_model = json!({"object": "list", "data": [{"id": "m1", "object": "not-a-model", "created": 0, "owned_by": "x"}]});
    if models_are_openai_compatible(&not_model) {
        return Err("Expected object != model to fail".to_owned());
    }
    let missing_created = json!({"object": "list", "data": [
        {"id": "m1", "object": "model", "created": 0, "owned_by": "x"},
        {"id": "m2", "object": "model", "owned_by": "x"}
    ]});
    if models_are_openai_compatible(&missing_created) {
        return Err("Expected any incomplete model to fail".to_owned());
    }
    let not_list = json!({"object": "list", "data": {"id": "m1"}});
    if models_are_openai_compatible(&not_list) {
        return Err("Expected non-list data to fail".to_owned());
    }
    if !models_are_openai_compatible(&json!({"object": "list", "data": []})) {
        return Err("Expected empty listing to be compatible".to_owned());
    }
    Ok(())
}

#[test]
fn header_predicates() -> Result<(), String> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Content-Type",
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    if !is_json_content_type(&headers) {
        return Err("Expected json content type".to_owned());
    }
    if has_cors_headers(&headers) {
        return Err("Expected missing CORS headers".to_owned());
    }
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    if has_cors_headers(&headers) {
        return Err("Expected missing Allow-Methods to fail".to_owned());
    }
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    if !has_cors_headers(&headers) {
        return Err("Expected CORS headers present".to_owned());
    }
    let mut text = HeaderMap::new();
    text.insert("Content-Type", HeaderValue::from_static("text/plain"));
    if is_json_content_type(&text) || is_json_content_type(&HeaderMap::new()) {
        return Err("Expected non-json content type to fail".to_owned());
    }
    Ok(())
}

#[test]
fn not_found_predicate() -> Result<(), String> {
    if !is_not_found(404) {
        return Err("404 must count as not found".to_owned());
    }
    if is_not_found(200) {
        return Err("200 must not count as not found".to_owned());
    }
    Ok(())
}

#[test]
fn success_rate_formatting() -> Result<(), String> {
    let cases = [
        (11, 0, "100.0"),
        (10, 1, "90.9"),
        (2, 1, "66.7"),
        (1, 2, "33.3"),
        (0, 5, "0.0"),
        (0, 0, "0.0"),
        (1, 7, "12.5"),
    ];
    for (passed, failed, expected) in cases {
        let rendered = format_success_rate(passed, failed);
        if rendered != expected {
            return Err(format!(
                "{}/{} rendered {} instead of {}",
                passed, failed, rendered, expected
            ));
        }
    }
    if success_rate_x10(3, 0) != 1000 {
        return Err("Expected 1000 tenths for a clean run".to_owned());
    }
    Ok(())
}

#[test]
fn run_test_classifies_outcomes() -> Result<(), String> {
    run_async_test(async {
        let mut session = TestSession::new(closed_port_client()?, false);

        let passed = session.run_test("passes", async { Ok::<bool, AppError>(true) }).await;
        let failed = session.run_test("fails", async { Ok::<bool, AppError>(false) }).await;
        let errored = session
            .run_test("errors", async {
                Err(AppError::http(HttpError::BaseUrlCannotBeABase {
                    url: "mailto:x".to_owned(),
                }))
            })
            .await;

        if !passed || failed || errored {
            return Err("Unexpected pass/fail return values".to_owned());
        }
        if session.passed() != 1 || session.failed() != 2 {
            return Err(format!(
                "Unexpected tally: {} passed, {} failed",
                session.passed(),
                session.failed()
            ));
        }
        let results = session.results();
        let kinds: Vec<Option<FailureKind>> = results.iter().map(|result| result.failure).collect();
        if kinds != [None, Some(FailureKind::Assertion), Some(FailureKind::Error)] {
            return Err(format!("Unexpected failure kinds: {:?}", kinds));
        }
        let message = results
            .get(2)
            .and_then(|result| result.error.as_deref())
            .ok_or("Expected error message")?;
        if !message.contains("mailto:x") {
            return Err(format!("Unexpected error message: {}", message));
        }
        Ok(())
    })
}

#[test]
fn run_test_tally_matches_check_count() -> Result<(), String> {
    run_async_test(async {
        let mut session = TestSession::new(closed_port_client()?, false);
        for index in 0..7u8 {
            let name = format!("check {}", index);
            session
                .run_test(&name, async move { Ok::<bool, AppError>(index % 3 == 0) })
                .await;
        }
        let total = session.passed().saturating_add(session.failed());
        if total != 7 || session.results().len() != 7 {
            return Err(format!("Expected 7 recorded tests, got {}", total));
        }
        if session.passed() != 3 {
            return Err(format!("Expected 3 passes, got {}", session.passed()));
        }
        Ok(())
    })
}

#[test]
fn check_against_closed_port_is_transport_failure() -> Result<(), String> {
    run_async_test(async {
        let client = closed_port_client()?;
        let mut session = TestSession::new(client.clone(), false);
        session
            .run_test("health", checks::health_endpoint(&client))
            .await;
        let result = session.results().first().ok_or("Expected a result")?;
        if result.passed || result.failure != Some(FailureKind::Transport) {
            return Err(format!("Unexpected result: {:?}", result));
        }
        Ok(())
    })
}

#[test]
fn readiness_gives_up_after_budget() -> Result<(), String> {
    run_async_test(async {
        let client = closed_port_client()?;
        let attempts = PositiveUsize::try_from(3).map_err(|err| err.to_string())?;
        let started = Instant::now();
        let ready = wait_until_ready(
            &client,
            attempts,
            Duration::from_millis(50),
            Duration::from_millis(200),
        )
        .await;
        if ready {
            return Err("Expected closed port to never be ready".to_owned());
        }
        let elapsed = started.elapsed();
        if elapsed < Duration::from_millis(100) {
            return Err(format!("Readiness returned too early: {:?}", elapsed));
        }
        if elapsed > Duration::from_secs(3) {
            return Err(format!("Readiness took too long: {:?}", elapsed));
        }
        Ok(())
    })
}

#[test]
fn suite_aborts_when_server_never_ready() -> Result<(), String> {
    run_async_test(async {
        let client = closed_port_client()?;
        let attempts = PositiveUsize::try_from(2).map_err(|err| err.to_string())?;
        let ten = PositiveUsize::try_from(10).map_err(|err| err.to_string())?;
        let plan = SuitePlan {
            ready_attempts: attempts,
            ready_interval: Duration::from_millis(10),
            ready_timeout: Duration::from_millis(200),
            max_latency: Duration::from_millis(100),
            concurrent_requests: ten,
            concurrent_workers: ten,
            sequential_requests: ten,
            sequential_pacing: Duration::from_millis(1),
            load: BatchPlan {
                batches: ten,
                batch_size: ten,
                width: ten,
                request_timeout: Duration::from_millis(100),
            },
            load_success_percent: Percent::try_from(80).map_err(|err| err.to_string())?,
        };
        let report = run_suite(client, &plan, false).await;
        if report.ready || report.success() {
            return Err("Expected aborted run".to_owned());
        }
        if !report.results.is_empty() || report.passed != 0 || report.failed != 0 {
            return Err("Expected no tests to run".to_owned());
        }
        Ok(())
    })
}
