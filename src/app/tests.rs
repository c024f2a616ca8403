use super::*;
use crate::http::{EndpointReport, ProbeResponse};
use crate::suite::{FailureKind, SuiteReport, TestResult};

fn open_report() -> ProbeReport {
    ProbeReport {
        base_url: "http://localhost:4891/".to_owned(),
        host: "localhost".to_owned(),
        port: 4891,
        port_open: true,
        model: "gpt-3.5-turbo".to_owned(),
        endpoints: vec![
            EndpointReport {
                name: "root_endpoint",
                method: "GET",
                path: "/",
                response: ProbeResponse::success(200, "GPT4All API"),
            },
            EndpointReport {
                name: "models_endpoint",
                method: "GET",
                path: "/v1/models",
                response: ProbeResponse::success(200, "{\"object\":\"list\"}"),
            },
            EndpointReport {
                name: "chat_endpoint",
                method: "POST",
                path: "/v1/chat/completions",
                response: ProbeResponse::failure("operation timed out".to_owned()),
            },
        ],
    }
}

fn suite_report(passed: usize, failed: usize, ready: bool) -> SuiteReport {
    let mut results = Vec::new();
    for index in 0..passed {
        results.push(TestResult {
            name: format!("pass {}", index),
            passed: true,
            error: None,
            failure: None,
        });
    }
    for index in 0..failed {
        results.push(TestResult {
            name: format!("fail {}", index),
            passed: false,
            error: None,
            failure: Some(FailureKind::Assertion),
        });
    }
    SuiteReport {
        base_url: "http://localhost:4891/".to_owned(),
        ready,
        passed,
        failed,
        success_rate: crate::suite::format_success_rate(passed, failed),
        results,
        finished_at: "2024-01-01T00:00:00+00:00".to_owned(),
    }
}

#[test]
fn endpoint_lookup_by_name() -> Result<(), String> {
    let report = open_report();
    let chat = report
        .endpoint("chat_endpoint")
        .ok_or("Expected chat endpoint")?;
    if !chat.response.is_error() {
        return Err("Expected chat endpoint to carry an error".to_owned());
    }
    if report.endpoint("missing").is_some() {
        return Err("Unexpected endpoint match".to_owned());
    }
    Ok(())
}

#[test]
fn open_port_lines_show_each_endpoint() -> Result<(), String> {
    let lines = probe_lines(&open_report());
    let wanted = [
        "Port 4891 is OPEN and listening",
        "  Status Code: 200",
        "  Response: GPT4All API",
        "  Error: operation timed out",
        "curl -X POST http://localhost:4891/v1/chat/completions \\",
    ];
    for line in wanted {
        if !lines.iter().any(|candidate| candidate == line) {
            return Err(format!("Missing line {:?} in {:?}", line, lines));
        }
    }
    if lines.iter().any(|line| line.contains("Restart GPT4All")) {
        return Err("Remediation steps must only show for a closed port".to_owned());
    }
    Ok(())
}

#[test]
fn closed_port_lines_show_remediation() -> Result<(), String> {
    let mut report = open_report();
    report.port_open = false;
    report.endpoints.clear();
    let lines = probe_lines(&report);
    if !lines
        .iter()
        .any(|line| line == "Port 4891 is CLOSED or not listening")
    {
        return Err(format!("Missing closed line in {:?}", lines));
    }
    if !lines.iter().any(|line| line == "  4. Set port to 4891") {
        return Err("Missing port remediation step".to_owned());
    }
    if lines.iter().any(|line| line.starts_with("curl")) {
        return Err("No curl suggestion expected for a closed port".to_owned());
    }
    Ok(())
}

#[test]
fn probe_report_json_omits_absent_fields() -> Result<(), String> {
    let value = serde_json::to_value(open_report()).map_err(|err| err.to_string())?;
    let chat = value
        .get("endpoints")
        .and_then(|endpoints| endpoints.get(2))
        .ok_or("Expected chat entry")?;
    if chat.get("status_code").is_some() || chat.get("error").is_none() {
        return Err(format!("Unexpected chat entry: {}", chat));
    }
    if value.get("port_open") != Some(&serde_json::Value::Bool(true)) {
        return Err("Expected port_open true".to_owned());
    }
    Ok(())
}

#[test]
fn summary_reports_rate_and_verdict() -> Result<(), String> {
    let lines = summary_lines(&suite_report(10, 1, true));
    for line in ["Passed: 10", "Failed: 1", "Success Rate: 90.9%"] {
        if !lines.iter().any(|candidate| candidate == line) {
            return Err(format!("Missing line {:?} in {:?}", line, lines));
        }
    }
    if !lines
        .iter()
        .any(|line| line == "1 tests failed. Please review the issues.")
    {
        return Err("Missing failure verdict".to_owned());
    }

    let clean = summary_lines(&suite_report(11, 0, true));
    if !clean.iter().any(|line| line == "Success Rate: 100.0%") {
        return Err(format!("Missing clean rate in {:?}", clean));
    }
    if !clean.iter().any(|line| line == "ALL INTEGRATION TESTS PASSED!") {
        return Err("Missing pass verdict".to_owned());
    }
    Ok(())
}

#[test]
fn summary_is_empty_when_suite_aborted() -> Result<(), String> {
    if !summary_lines(&suite_report(0, 0, false)).is_empty() {
        return Err("Aborted runs print no summary".to_owned());
    }
    Ok(())
}
