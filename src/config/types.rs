use std::time::Duration;

use serde::Deserialize;

use crate::args::OutputFormat;
use crate::args::parsers::parse_duration_arg;
use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub target: Option<TargetConfig>,
    pub probe: Option<ProbeConfig>,
    pub suite: Option<SuiteConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub verbose: Option<bool>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    pub connect_timeout: Option<DurationValue>,
    pub request_timeout: Option<DurationValue>,
    pub chat_timeout: Option<DurationValue>,
    pub model: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    pub request_timeout: Option<DurationValue>,
    pub ready_attempts: Option<usize>,
    pub ready_interval: Option<DurationValue>,
    pub max_latency: Option<DurationValue>,
    pub concurrent_requests: Option<usize>,
    pub concurrent_workers: Option<usize>,
    pub sequential_requests: Option<usize>,
    pub sequential_pacing: Option<DurationValue>,
    pub load_batches: Option<usize>,
    pub load_batch_size: Option<usize>,
    pub load_workers: Option<usize>,
    pub load_timeout: Option<DurationValue>,
    pub load_success_percent: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(0) => Err(ConfigError::InvalidDuration {
                field,
                message: "Duration must be > 0.".to_owned(),
            }),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => {
                parse_duration_arg(text).map_err(|err| ConfigError::InvalidDuration {
                    field,
                    message: err.to_string(),
                })
            }
        }
    }
}
