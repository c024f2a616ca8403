//! Integration suite: readiness wait, the ordered check list, and the tally.
mod assertions;
pub mod checks;
mod readiness;
mod session;
mod summary;

#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::args::{DEFAULT_READY_TIMEOUT, Percent, PositiveUsize, SuiteArgs};
use crate::http::ApiClient;
use crate::load::BatchPlan;

pub use assertions::{
    has_cors_headers, health_body_is_valid, is_json_content_type, is_not_found,
    models_are_openai_compatible, models_body_is_valid,
};
pub use readiness::wait_until_ready;
pub use session::{FailureKind, TestResult, TestSession};
pub use summary::{format_success_rate, success_rate_x10};

/// Tunables for one suite run.
#[derive(Debug, Clone, Copy)]
pub struct SuitePlan {
    pub ready_attempts: PositiveUsize,
    pub ready_interval: Duration,
    pub ready_timeout: Duration,
    pub max_latency: Duration,
    pub concurrent_requests: PositiveUsize,
    pub concurrent_workers: PositiveUsize,
    pub sequential_requests: PositiveUsize,
    pub sequential_pacing: Duration,
    pub load: BatchPlan,
    pub load_success_percent: Percent,
}

impl SuitePlan {
    #[must_use]
    pub const fn from_args(args: &SuiteArgs) -> Self {
        Self {
            ready_attempts: args.ready_attempts,
            ready_interval: args.ready_interval,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            max_latency: args.max_latency,
            concurrent_requests: args.concurrent_requests,
            concurrent_workers: args.concurrent_workers,
            sequential_requests: args.sequential_requests,
            sequential_pacing: args.sequential_pacing,
            load: BatchPlan {
                batches: args.load_batches,
                batch_size: args.load_batch_size,
                width: args.load_workers,
                request_timeout: args.load_timeout,
            },
            load_success_percent: args.load_success_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub ready: bool,
    pub passed: usize,
    pub failed: usize,
    pub success_rate: String,
    pub results: Vec<TestResult>,
    pub finished_at: String,
}

impl SuiteReport {
    /// The run succeeds only when the server became ready and nothing failed.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.ready && self.failed == 0
    }
}

/// Waits for readiness, then runs the fixed check list in order.
///
/// With `echo` set, the readiness banner and per-test lines are printed as
/// the suite progresses.
pub async fn run_suite(client: ApiClient, plan: &SuitePlan, echo: bool) -> SuiteReport {
    let base_url = client.base_url().to_string();

    if echo {
        println!("Waiting for server to be ready...");
    }
    let ready = wait_until_ready(
        &client,
        plan.ready_attempts,
        plan.ready_interval,
        plan.ready_timeout,
    )
    .await;
    if !ready {
        warn!(
            "{} did not answer /health within {} attempt(s)",
            base_url,
            plan.ready_attempts.get()
        );
        if echo {
            println!("Server not responding, aborting tests");
        }
        return finish(base_url, false, TestSession::new(client, echo));
    }
    if echo {
        println!("Server is ready!\n");
    }

    let mut session = TestSession::new(client, echo);
    run_checks(&mut session, plan).await;
    info!(
        "Suite finished: {} passed, {} failed",
        session.passed(),
        session.failed()
    );
    finish(base_url, true, session)
}

async fn run_checks(session: &mut TestSession, plan: &SuitePlan) {
    let shared = session.client().clone();
    let client = &shared;
    session
        .run_test(
            "Health endpoint functionality",
            checks::health_endpoint(client),
        )
        .await;
    session
        .run_test(
            "Models endpoint functionality",
            checks::models_endpoint(client),
        )
        .await;
    session
        .run_test("404 error handling", checks::unknown_path_is_404(client))
        .await;
    session
        .run_test("CORS headers present", checks::cors_headers(client))
        .await;
    session
        .run_test("OPTIONS method support", checks::options_preflight(client))
        .await;
    session
        .run_test("JSON content type", checks::json_content_type(client))
        .await;
    session
        .run_test(
            &format!("Response time < {}ms", plan.max_latency.as_millis()),
            checks::response_time(client, plan.max_latency),
        )
        .await;
    session
        .run_test(
            &format!("Concurrent requests ({})", plan.concurrent_requests),
            checks::concurrent_requests(
                client,
                plan.concurrent_requests,
                plan.concurrent_workers,
            ),
        )
        .await;
    session
        .run_test(
            "Persistent connection handling",
            checks::persistent_connection(
                client,
                plan.sequential_requests,
                plan.sequential_pacing,
            ),
        )
        .await;
    session
        .run_test(
            "Large concurrent load",
            checks::large_concurrent_load(client, plan.load, plan.load_success_percent),
        )
        .await;
    session
        .run_test(
            "OpenAI API compatibility",
            checks::openai_compatibility(client),
        )
        .await;
}

fn finish(base_url: String, ready: bool, session: TestSession) -> SuiteReport {
    let passed = session.passed();
    let failed = session.failed();
    SuiteReport {
        base_url,
        ready,
        passed,
        failed,
        success_rate: format_success_rate(passed, failed),
        results: session.into_results(),
        finished_at: chrono::Utc::now().to_rfc3339(),
    }
}
