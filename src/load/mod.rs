//! Bounded-concurrency request fan-out.
mod pool;
mod shapes;


pub use pool::run_bounded;
pub use shapes::{BatchPlan, all_succeed, batched_successes, required_successes};
