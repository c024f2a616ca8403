use std::future::Future;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult};

/// Runs every task with at most `width` in flight and returns all results
/// once every task has finished. Result order follows task order, but tasks
/// may complete in any order; nothing is cancelled early.
///
/// # Errors
///
/// Returns an error when a task panicked or could not take a permit.
pub async fn run_bounded<T, F, Fut>(width: PositiveUsize, tasks: Vec<F>) -> AppResult<Vec<T>>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let permits = Arc::new(Semaphore::new(width.get()));
    let mut handles = Vec::with_capacity(tasks.len());

    for task in tasks {
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            Ok::<T, AppError>(task().await)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for joined in join_all(handles).await {
        results.push(joined??);
    }
    Ok(results)
}
