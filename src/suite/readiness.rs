use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::args::PositiveUsize;
use crate::http::ApiClient;

/// Polls `GET /health` until it answers 200, at most `attempts` times with
/// `interval` between polls. Returns whether the server became ready.
pub async fn wait_until_ready(
    client: &ApiClient,
    attempts: PositiveUsize,
    interval: Duration,
    request_timeout: Duration,
) -> bool {
    let attempts = attempts.get();
    for attempt in 1..=attempts {
        match client.get_with_timeout("/health", request_timeout).await {
            Ok(response) if response.status().as_u16() == 200 => {
                info!("Server ready after {} attempt(s)", attempt);
                return true;
            }
            Ok(response) => {
                debug!(
                    "Readiness attempt {}/{}: status {}",
                    attempt,
                    attempts,
                    response.status()
                );
            }
            Err(err) => {
                debug!("Readiness attempt {}/{}: {}", attempt, attempts, err);
            }
        }
        if attempt < attempts {
            sleep(interval).await;
        }
    }
    false
}
