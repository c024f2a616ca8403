//! Runs the two entry points and renders their reports.
mod probe;
mod suite;

#[cfg(test)]
mod tests;

pub use probe::{ProbeReport, probe_lines, print_probe_report, run_probe};
pub use suite::{print_suite_report, summary_lines};
