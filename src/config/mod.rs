//! Configuration loading and application.
mod apply;
mod loader;
pub mod types;


pub use apply::{apply_probe_config, apply_suite_config};
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
