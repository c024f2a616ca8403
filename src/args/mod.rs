//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{ProbeArgs, SuiteArgs, TargetArgs};
pub use defaults::{DEFAULT_HOST, DEFAULT_PORT};
pub use types::{OutputFormat, Percent, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_READY_TIMEOUT, DEFAULT_USER_AGENT};
