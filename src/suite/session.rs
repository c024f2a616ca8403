use std::future::Future;
use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::error::{AppResult, display_chain};
use crate::http::ApiClient;

/// Why a test did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The check ran and returned `false`.
    Assertion,
    /// The server could not be reached or did not answer in time.
    Transport,
    /// Any other error raised while the check ran.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl TestResult {
    fn from_outcome(name: &str, outcome: AppResult<bool>) -> Self {
        match outcome {
            Ok(true) => Self {
                name: name.to_owned(),
                passed: true,
                error: None,
                failure: None,
            },
            Ok(false) => Self {
                name: name.to_owned(),
                passed: false,
                error: None,
                failure: Some(FailureKind::Assertion),
            },
            Err(err) => Self {
                name: name.to_owned(),
                passed: false,
                failure: Some(if err.is_transport() {
                    FailureKind::Transport
                } else {
                    FailureKind::Error
                }),
                error: Some(display_chain(&err)),
            },
        }
    }
}

/// One run of the suite against one server: the shared client, the tallies,
/// and the ordered results.
#[derive(Debug)]
pub struct TestSession {
    client: ApiClient,
    echo: bool,
    passed: usize,
    failed: usize,
    results: Vec<TestResult>,
}

impl TestSession {
    /// With `echo` set, every test prints a `Testing <name>... PASS|FAIL` line.
    #[must_use]
    pub const fn new(client: ApiClient, echo: bool) -> Self {
        Self {
            client,
            echo,
            passed: 0,
            failed: 0,
            results: Vec::new(),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Awaits `check` and records the outcome. Errors are swallowed into a
    /// failed result; the return value is whether the test passed.
    pub async fn run_test<Fut>(&mut self, name: &str, check: Fut) -> bool
    where
        Fut: Future<Output = AppResult<bool>>,
    {
        if self.echo {
            print!("Testing {}... ", name);
            drop(std::io::stdout().flush());
        }

        let result = TestResult::from_outcome(name, check.await);
        if result.passed {
            self.passed = self.passed.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
        }

        if self.echo {
            match (result.passed, result.error.as_deref()) {
                (true, _) => println!("PASS"),
                (false, Some(message)) => println!("FAIL - Exception: {}", message),
                (false, None) => println!("FAIL"),
            }
        }
        debug!(
            "Test '{}' finished: passed={} failure={:?}",
            result.name, result.passed, result.failure
        );

        let passed = result.passed;
        self.results.push(result);
        passed
    }

    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    #[must_use]
    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }
}
