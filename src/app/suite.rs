use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::suite::SuiteReport;

/// Closing block printed after the per-test lines.
#[must_use]
pub fn summary_lines(report: &SuiteReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.ready {
        return lines;
    }
    lines.push(String::new());
    lines.push("=".repeat(60));
    lines.push("Test Results:".to_owned());
    lines.push(format!("Passed: {}", report.passed));
    lines.push(format!("Failed: {}", report.failed));
    lines.push(format!("Success Rate: {}%", report.success_rate));
    lines.push(String::new());
    if report.failed == 0 {
        lines.push("ALL INTEGRATION TESTS PASSED!".to_owned());
        lines.push(format!(
            "{} is compatible with OpenAI API clients.",
            report.base_url
        ));
    } else {
        lines.push(format!(
            "{} tests failed. Please review the issues.",
            report.failed
        ));
    }
    lines
}

/// Writes the suite outcome to stdout. In text mode the per-test lines were
/// already printed while running, so only the summary follows.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn print_suite_report(report: &SuiteReport, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in summary_lines(report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
