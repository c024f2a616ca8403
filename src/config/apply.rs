use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{Percent, PositiveUsize, ProbeArgs, SuiteArgs, TargetArgs};
use crate::error::ConfigError;

use super::types::{ConfigFile, ProbeConfig, SuiteConfig, TargetConfig};

/// Applies configuration values to probe arguments.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_probe_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if let Some(target) = config.target.as_ref() {
        apply_target(&mut args.target, matches, target);
    }
    let Some(probe) = config.probe.as_ref() else {
        return Ok(());
    };
    apply_probe_section(args, matches, probe)
}

/// Applies configuration values to suite arguments.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_suite_config(
    args: &mut SuiteArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if let Some(target) = config.target.as_ref() {
        apply_target(&mut args.target, matches, target);
    }
    let Some(suite) = config.suite.as_ref() else {
        return Ok(());
    };
    apply_suite_section(args, matches, suite)
}

/// `--base-url` on the command line masks the config `host` and `port`, and
/// `--host` or `--port` masks the config `base_url`.
fn apply_target(args: &mut TargetArgs, matches: &ArgMatches, config: &TargetConfig) {
    let cli_base_url = is_cli(matches, "base_url");
    let cli_host_port = is_cli(matches, "host") || is_cli(matches, "port");

    if !cli_base_url
        && !is_cli(matches, "host")
        && let Some(host) = config.host.clone()
    {
        args.host = host;
    }

    if !cli_base_url
        && !is_cli(matches, "port")
        && let Some(port) = config.port
    {
        args.port = port;
    }

    if !cli_base_url
        && !cli_host_port
        && let Some(base_url) = config.base_url.clone()
    {
        args.base_url = Some(base_url);
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }
}

fn apply_probe_section(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ProbeConfig,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "connect_timeout")
        && let Some(value) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = value.to_duration("probe.connect_timeout")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(value) = config.request_timeout.as_ref()
    {
        args.request_timeout = value.to_duration("probe.request_timeout")?;
    }

    if !is_cli(matches, "chat_timeout")
        && let Some(value) = config.chat_timeout.as_ref()
    {
        args.chat_timeout = value.to_duration("probe.chat_timeout")?;
    }

    if !is_cli(matches, "model")
        && let Some(model) = config.model.clone()
    {
        args.model = model;
    }

    if !is_cli(matches, "prompt")
        && let Some(prompt) = config.prompt.clone()
    {
        args.prompt = prompt;
    }

    Ok(())
}

fn apply_suite_section(
    args: &mut SuiteArgs,
    matches: &ArgMatches,
    config: &SuiteConfig,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "request_timeout")
        && let Some(value) = config.request_timeout.as_ref()
    {
        args.request_timeout = value.to_duration("suite.request_timeout")?;
    }

    if !is_cli(matches, "ready_attempts")
        && let Some(value) = config.ready_attempts
    {
        args.ready_attempts = ensure_positive_usize(value, "suite.ready_attempts")?;
    }

    if !is_cli(matches, "ready_interval")
        && let Some(value) = config.ready_interval.as_ref()
    {
        args.ready_interval = value.to_duration("suite.ready_interval")?;
    }

    if !is_cli(matches, "max_latency")
        && let Some(value) = config.max_latency.as_ref()
    {
        args.max_latency = value.to_duration("suite.max_latency")?;
    }

    if !is_cli(matches, "concurrent_requests")
        && let Some(value) = config.concurrent_requests
    {
        args.concurrent_requests = ensure_positive_usize(value, "suite.concurrent_requests")?;
    }

    if !is_cli(matches, "concurrent_workers")
        && let Some(value) = config.concurrent_workers
    {
        args.concurrent_workers = ensure_positive_usize(value, "suite.concurrent_workers")?;
    }

    if !is_cli(matches, "sequential_requests")
        && let Some(value) = config.sequential_requests
    {
        args.sequential_requests = ensure_positive_usize(value, "suite.sequential_requests")?;
    }

    if !is_cli(matches, "sequential_pacing")
        && let Some(value) = config.sequential_pacing.as_ref()
    {
        args.sequential_pacing = value.to_duration("suite.sequential_pacing")?;
    }

    if !is_cli(matches, "load_batches")
        && let Some(value) = config.load_batches
    {
        args.load_batches = ensure_positive_usize(value, "suite.load_batches")?;
    }

    if !is_cli(matches, "load_batch_size")
        && let Some(value) = config.load_batch_size
    {
        args.load_batch_size = ensure_positive_usize(value, "suite.load_batch_size")?;
    }

    if !is_cli(matches, "load_workers")
        && let Some(value) = config.load_workers
    {
        args.load_workers = ensure_positive_usize(value, "suite.load_workers")?;
    }

    if !is_cli(matches, "load_timeout")
        && let Some(value) = config.load_timeout.as_ref()
    {
        args.load_timeout = value.to_duration("suite.load_timeout")?;
    }

    if !is_cli(matches, "load_success_percent")
        && let Some(value) = config.load_success_percent
    {
        args.load_success_percent =
            Percent::try_from(value).map_err(|_err| ConfigError::PercentOutOfRange {
                field: "suite.load_success_percent",
            })?;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &'static str) -> Result<PositiveUsize, ConfigError> {
    PositiveUsize::try_from(value).map_err(|_err| ConfigError::FieldMustBePositive { field })
}
