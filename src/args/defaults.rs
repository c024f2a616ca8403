use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apismoke/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 4891;

pub(crate) const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub(crate) const DEFAULT_PROMPT: &str = "Hello, this is a test message";

/// Default config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["apismoke.toml", "apismoke.json"];

/// Budget used by the readiness loop when no override is configured.
pub(crate) const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(1);
