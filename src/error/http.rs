use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' cannot carry a path.")]
    BaseUrlCannotBeABase { url: String },
    #[error("Base URL '{url}' has no host or port to probe.")]
    MissingHostOrPort { url: String },
    #[error("Failed to join '{path}' onto '{base}': {source}")]
    JoinUrlFailed {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
