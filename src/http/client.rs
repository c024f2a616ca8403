use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::args::{DEFAULT_USER_AGENT, TargetArgs};
use crate::error::{AppError, AppResult, HttpError};

/// Builds the base URL from `--base-url`, or from `--host`/`--port`.
///
/// The returned URL always has a path ending in `/` so endpoint paths join
/// underneath it instead of replacing it.
///
/// # Errors
///
/// Returns an error when the URL does not parse or cannot carry a path.
pub fn resolve_base_url(target: &TargetArgs) -> AppResult<Url> {
    let raw = target
        .base_url
        .clone()
        .unwrap_or_else(|| format!("http://{}:{}", target.host, target.port));
    let mut url = Url::parse(&raw).map_err(|err| {
        AppError::http(HttpError::InvalidBaseUrl {
            url: raw.clone(),
            source: err,
        })
    })?;
    if url.cannot_be_a_base() {
        return Err(AppError::http(HttpError::BaseUrlCannotBeABase { url: raw }));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// HTTP session bound to one base URL. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(base_url: Url, request_timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` (leading `/` optional) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        let relative = path.trim_start_matches('/');
        self.base_url.join(relative).map_err(|err| {
            AppError::http(HttpError::JoinUrlFailed {
                base: self.base_url.to_string(),
                path: path.to_owned(),
                source: err,
            })
        })
    }

    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or times out.
    pub async fn get(&self, path: &str) -> AppResult<Response> {
        Self::send(self.request(Method::GET, path)?).await
    }

    /// GET with a per-request timeout overriding the client default.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or times out.
    pub async fn get_with_timeout(&self, path: &str, timeout: Duration) -> AppResult<Response> {
        Self::send(self.request(Method::GET, path)?.timeout(timeout)).await
    }

    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or times out.
    pub async fn options(&self, path: &str) -> AppResult<Response> {
        Self::send(self.request(Method::OPTIONS, path)?).await
    }

    /// # Errors
    ///
    /// Returns an error when the body cannot be encoded or the request fails.
    pub async fn post_json<T>(&self, path: &str, body: &T, timeout: Duration) -> AppResult<Response>
    where
        T: Serialize + ?Sized,
    {
        Self::send(self.request(Method::POST, path)?.json(body).timeout(timeout)).await
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    async fn send(builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await?;
        debug!("{} -> {}", response.url(), response.status());
        Ok(response)
    }
}
