//! Process-level wiring shared by both executables: parse, configure, log,
//! build the runtime, run, report.
use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{print_probe_report, print_suite_report, run_probe};
use crate::args::{OutputFormat, ProbeArgs, SuiteArgs};
use crate::config::{apply_probe_config, apply_suite_config, load_config};
use crate::error::{AppError, AppResult, ValidationError, display_chain};
use crate::http::{ApiClient, resolve_base_url};
use crate::suite::{SuitePlan, run_suite};

/// Runs the port and endpoint probe with the process arguments.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration. An unreachable
/// server is reported, not returned as an error.
pub fn probe_main() -> AppResult<()> {
    probe_main_from(std::env::args_os())
}

/// Runs the integration suite with the process arguments. Returns whether
/// every check passed.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration.
pub fn suite_main() -> AppResult<bool> {
    suite_main_from(std::env::args_os())
}

/// # Errors
///
/// See [`probe_main`].
pub fn probe_main_from<I, T>(raw_args: I) -> AppResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some((mut args, matches)) = parse_args::<ProbeArgs, _, _>(raw_args)? else {
        return Ok(());
    };
    if let Some(config) = load_config(args.target.config.as_deref())? {
        apply_probe_config(&mut args, &matches, &config)?;
    }
    crate::logger::init_logging(args.target.verbose);

    let runtime = build_runtime()?;
    let report = runtime.block_on(run_probe(&args))?;
    print_probe_report(&report, args.target.output_format)
}

/// # Errors
///
/// See [`suite_main`].
pub fn suite_main_from<I, T>(raw_args: I) -> AppResult<bool>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some((mut args, matches)) = parse_args::<SuiteArgs, _, _>(raw_args)? else {
        return Ok(true);
    };
    if let Some(config) = load_config(args.target.config.as_deref())? {
        apply_suite_config(&mut args, &matches, &config)?;
    }
    crate::logger::init_logging(args.target.verbose);

    let base_url = resolve_base_url(&args.target)?;
    let client = ApiClient::new(base_url, args.request_timeout)?;
    let plan = SuitePlan::from_args(&args);
    let format = args.target.output_format;
    let echo = format == OutputFormat::Text;

    if echo {
        println!("Starting integration tests against {}", client.base_url());
        println!("{}", "=".repeat(60));
    }
    let runtime = build_runtime()?;
    let report = runtime.block_on(run_suite(client, &plan, echo));
    print_suite_report(&report, format)?;
    Ok(report.success())
}

/// Parses arguments. `None` means help or version text was printed and the
/// process should stop.
fn parse_args<A, I, T>(raw_args: I) -> AppResult<Option<(A, ArgMatches)>>
where
    A: CommandFactory + FromArgMatches,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match A::command().try_get_matches_from(raw_args) {
        Ok(matches) => matches,
        Err(err) if !err.use_stderr() => {
            err.print()?;
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let args = A::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

fn build_runtime() -> AppResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))
}

/// Prints a fatal error to stderr. Clap errors keep their own formatting.
pub fn report_error(err: &AppError) {
    if let AppError::Clap { source } = err
        && source.print().is_ok()
    {
        return;
    }
    eprintln!("Error: {}", display_chain(err));
}
