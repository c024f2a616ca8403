use clap::{Args, Parser};
use std::time::Duration;

use super::defaults::{DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_PROMPT};
use super::parsers::{parse_duration_arg, parse_percent, parse_positive_usize};
use super::types::{OutputFormat, Percent, PositiveUsize};

/// Where the API server lives and how results are reported.
#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    /// Host the local API server listens on
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port the local API server listens on
    #[arg(long, short = 'p', default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Full base URL (overrides --host/--port)
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./apismoke.toml or ./apismoke.json if present.
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by APISMOKE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Report format written to stdout
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "apismoke-probe",
    version,
    about = "Check whether the local API server port is open and probe its endpoints."
)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Timeout for the raw TCP port check (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = "1s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Timeout for GET probes (supports ms/s/m/h)
    #[arg(long = "request-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for the chat completion probe (supports ms/s/m/h)
    #[arg(long = "chat-timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub chat_timeout: Duration,

    /// Model id sent to /v1/chat/completions
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// User message sent to /v1/chat/completions
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "apismoke-suite",
    version,
    about = "Run the integration suite against a running local API server."
)]
pub struct SuiteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Timeout for individual check requests (supports ms/s/m/h)
    #[arg(long = "request-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Number of /health polls before giving up on the server
    #[arg(long = "ready-attempts", default_value = "10", value_parser = parse_positive_usize)]
    pub ready_attempts: PositiveUsize,

    /// Pause between readiness polls (supports ms/s/m/h)
    #[arg(long = "ready-interval", default_value = "1s", value_parser = parse_duration_arg)]
    pub ready_interval: Duration,

    /// Latency budget for a single /health request (supports ms/s/m/h)
    #[arg(long = "max-latency", default_value = "100ms", value_parser = parse_duration_arg)]
    pub max_latency: Duration,

    /// Requests fired by the concurrency check
    #[arg(long = "concurrent-requests", default_value = "20", value_parser = parse_positive_usize)]
    pub concurrent_requests: PositiveUsize,

    /// Worker pool width for the concurrency check
    #[arg(long = "concurrent-workers", default_value = "10", value_parser = parse_positive_usize)]
    pub concurrent_workers: PositiveUsize,

    /// Requests sent on one client by the persistent-connection check
    #[arg(long = "sequential-requests", default_value = "5", value_parser = parse_positive_usize)]
    pub sequential_requests: PositiveUsize,

    /// Pause between persistent-connection requests (supports ms/s/m/h)
    #[arg(long = "sequential-pacing", default_value = "100ms", value_parser = parse_duration_arg)]
    pub sequential_pacing: Duration,

    /// Batches fired by the load check
    #[arg(long = "load-batches", default_value = "5", value_parser = parse_positive_usize)]
    pub load_batches: PositiveUsize,

    /// Sequential requests inside each load batch
    #[arg(long = "load-batch-size", default_value = "10", value_parser = parse_positive_usize)]
    pub load_batch_size: PositiveUsize,

    /// Worker pool width for the load check
    #[arg(long = "load-workers", default_value = "5", value_parser = parse_positive_usize)]
    pub load_workers: PositiveUsize,

    /// Per-request timeout inside load batches (supports ms/s/m/h)
    #[arg(long = "load-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub load_timeout: Duration,

    /// Share of load requests that must succeed (1-100)
    #[arg(long = "load-success-percent", default_value = "80", value_parser = parse_percent)]
    pub load_success_percent: Percent,
}
