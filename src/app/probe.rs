use serde::Serialize;
use tracing::info;

use crate::args::{OutputFormat, ProbeArgs};
use crate::error::{AppError, AppResult, HttpError};
use crate::http::{
    ApiClient, EndpointReport, ProbePlan, check_port_open, host_and_port, probe_endpoints,
    resolve_base_url,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub port_open: bool,
    pub model: String,
    pub endpoints: Vec<EndpointReport>,
}

impl ProbeReport {
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&EndpointReport> {
        self.endpoints.iter().find(|report| report.name == name)
    }
}

/// Checks the port, then probes the endpoints only when it is open.
///
/// # Errors
///
/// Returns an error when the base URL is invalid or the HTTP client cannot
/// be built. Request failures are recorded in the report instead.
pub async fn run_probe(args: &ProbeArgs) -> AppResult<ProbeReport> {
    let base_url = resolve_base_url(&args.target)?;
    let (host, port) = host_and_port(&base_url).ok_or_else(|| {
        AppError::http(HttpError::MissingHostOrPort {
            url: base_url.to_string(),
        })
    })?;

    let port_open = check_port_open(&host, port, args.connect_timeout).await;
    info!(
        "Port {}:{} is {}",
        host,
        port,
        if port_open { "open" } else { "closed" }
    );

    let endpoints = if port_open {
        let client = ApiClient::new(base_url.clone(), args.request_timeout)?;
        let plan = ProbePlan {
            request_timeout: args.request_timeout,
            chat_timeout: args.chat_timeout,
            model: args.model.clone(),
            prompt: args.prompt.clone(),
        };
        probe_endpoints(&client, &plan).await
    } else {
        Vec::new()
    };

    Ok(ProbeReport {
        base_url: base_url.to_string(),
        host,
        port,
        port_open,
        model: args.model.clone(),
        endpoints,
    })
}

/// Human-readable probe output, one entry per line.
#[must_use]
pub fn probe_lines(report: &ProbeReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Local API Server Probe".to_owned());
    lines.push("=".repeat(50));
    lines.push(format!("Checking if port {} is open...", report.port));

    if !report.port_open {
        lines.push(format!("Port {} is CLOSED or not listening", report.port));
        lines.push(String::new());
        lines.push("This means the local API server is NOT running".to_owned());
        lines.push("Possible reasons:".to_owned());
        lines.push("  - Server not enabled in GPT4All settings".to_owned());
        lines.push("  - GPT4All not running".to_owned());
        lines.push("  - Different port configured".to_owned());
        lines.push(String::new());
        lines.push("To enable:".to_owned());
        lines.push("  1. Open GPT4All".to_owned());
        lines.push("  2. Go to Settings -> Application Settings".to_owned());
        lines.push("  3. Look for 'Enable Local API Server'".to_owned());
        lines.push(format!("  4. Set port to {}", report.port));
        lines.push("  5. Restart GPT4All".to_owned());
        return lines;
    }

    lines.push(format!("Port {} is OPEN and listening", report.port));
    lines.push(String::new());
    lines.push("Testing API endpoints...".to_owned());
    for endpoint in &report.endpoints {
        lines.push(String::new());
        lines.push(format!(
            "{} ({} {}):",
            endpoint.name, endpoint.method, endpoint.path
        ));
        let response = &endpoint.response;
        if let Some(error) = response.error.as_deref() {
            lines.push(format!("  Error: {}", error));
            continue;
        }
        if let Some(status) = response.status_code {
            lines.push(format!("  Status Code: {}", status));
        }
        lines.push(format!(
            "  Response: {}",
            response.body_excerpt.as_deref().unwrap_or("")
        ));
    }

    let chat_url = format!("{}v1/chat/completions", report.base_url);
    lines.push(String::new());
    lines.push("Manual test with curl:".to_owned());
    lines.push(format!("curl -X POST {} \\", chat_url));
    lines.push("  -H \"Content-Type: application/json\" \\".to_owned());
    lines.push(format!(
        "  -d '{{\"model\":\"{}\",\"messages\":[{{\"role\":\"user\",\"content\":\"Hello\"}}]}}'",
        report.model
    ));
    lines
}

/// Writes the report to stdout in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn print_probe_report(report: &ProbeReport, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in probe_lines(report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
