//! HTTP client, raw port probe, and one-shot endpoint probes.
mod client;
mod endpoints;
mod port;


pub use client::{ApiClient, resolve_base_url};
pub use endpoints::{
    BODY_EXCERPT_CHARS, ChatCompletionRequest, ChatMessage, EndpointReport, ProbePlan,
    ProbeResponse, excerpt, probe_endpoints,
};
pub use port::{check_port_open, host_and_port};
