//! Smoke-test harness for an OpenAI-compatible local API server.
//!
//! Two executables sit on top of this library: `apismoke-probe` checks the
//! port and prints what the main endpoints answer, and `apismoke-suite`
//! waits for `/health` and runs the ordered integration checks, including a
//! bounded-concurrency load phase.
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod load;
pub mod logger;
pub mod suite;
