use std::time::Duration;

use tracing::debug;

use super::pool::run_bounded;
use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult};
use crate::http::ApiClient;

/// Fires `count` independent GETs of `path`, `width` at a time, and reports
/// whether every one returned 200.
///
/// # Errors
///
/// Returns the first request error after all requests have finished.
pub async fn all_succeed(
    client: &ApiClient,
    path: &'static str,
    count: PositiveUsize,
    width: PositiveUsize,
) -> AppResult<bool> {
    let tasks: Vec<_> = (0..count.get())
        .map(|_| {
            let client = client.clone();
            move || async move {
                let response = client.get(path).await?;
                Ok::<bool, AppError>(response.status().as_u16() == 200)
            }
        })
        .collect();

    let outcomes: Vec<AppResult<bool>> = run_bounded(width, tasks).await?;
    let mut all_ok = true;
    for outcome in outcomes {
        all_ok &= outcome?;
    }
    Ok(all_ok)
}

#[derive(Debug, Clone, Copy)]
pub struct BatchPlan {
    pub batches: PositiveUsize,
    pub batch_size: PositiveUsize,
    pub width: PositiveUsize,
    pub request_timeout: Duration,
}

impl BatchPlan {
    #[must_use]
    pub const fn total_requests(&self) -> usize {
        self.batches.get().saturating_mul(self.batch_size.get())
    }
}

/// Runs `plan.batches` workers, each sending `plan.batch_size` sequential
/// GETs, and sums the 200 responses. Individual request errors only reduce
/// the count.
///
/// # Errors
///
/// Returns an error when a batch task panicked.
pub async fn batched_successes(
    client: &ApiClient,
    path: &'static str,
    plan: BatchPlan,
) -> AppResult<usize> {
    let tasks: Vec<_> = (0..plan.batches.get())
        .map(|batch| {
            let client = client.clone();
            move || async move {
                let mut successes: usize = 0;
                for _ in 0..plan.batch_size.get() {
                    match client.get_with_timeout(path, plan.request_timeout).await {
                        Ok(response) if response.status().as_u16() == 200 => {
                            successes = successes.saturating_add(1);
                        }
                        Ok(response) => {
                            debug!("Batch {} got status {}", batch, response.status());
                        }
                        Err(err) => {
                            debug!("Batch {} request failed: {}", batch, err);
                        }
                    }
                }
                successes
            }
        })
        .collect();

    let counts = run_bounded(plan.width, tasks).await?;
    Ok(counts
        .into_iter()
        .fold(0usize, |total, count| total.saturating_add(count)))
}

/// Smallest success count that meets `percent` of `total` (ceiling).
#[must_use]
pub const fn required_successes(total: usize, percent: u8) -> usize {
    let scaled = total.saturating_mul(percent as usize);
    scaled.div_ceil(100)
}
