use std::ffi::OsStr;
use std::process::{Command, Output};

/// Run the `apismoke-probe` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_probe<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_bin(option_env!("CARGO_BIN_EXE_apismoke-probe"), "apismoke-probe", args)
}

/// Run the `apismoke-suite` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_suite<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_bin(option_env!("CARGO_BIN_EXE_apismoke-suite"), "apismoke-suite", args)
}

/// Run the `apismoke-suite` binary with `APISMOKE_LOG` set to `filter`.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_suite_with_log<I, S>(filter: &str, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let path = option_env!("CARGO_BIN_EXE_apismoke-suite");
    run_bin_with_log(path, "apismoke-suite", filter, args)
}

fn run_bin<I, S>(path: Option<&str>, name: &str, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_bin_with_log(path, name, "error", args)
}

fn run_bin_with_log<I, S>(
    path: Option<&str>,
    name: &str,
    filter: &str,
    args: I,
) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = path.ok_or_else(|| format!("CARGO_BIN_EXE_{} missing at compile time.", name))?;
    Command::new(bin)
        .args(args)
        .env("APISMOKE_LOG", filter)
        .output()
        .map_err(|err| format!("run {} failed: {}", name, err))
}

/// Stdout and stderr, for failure messages.
#[must_use]
pub fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
