//! Authenticated HTTP transport shared by every resource client.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT;
use crate::error::ClientError;

/// Client name sent in the `User-Agent` header.
pub const CLIENT_NAME: &str = "AbacatePay-Rust-SDK";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Replaces the transport's default timeout when non-zero.
    pub timeout: Option<Duration>,
    /// Applied after the default headers; later entries win.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the timeout for this call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add or override a header for this call.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Issues authenticated JSON requests against the API host.
///
/// Configuration is fixed at construction; clones share the underlying
/// connection pool.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    version: String,
    authorization: HeaderValue,
    user_agent: HeaderValue,
    timeout: Duration,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token for the `Authorization` header
    /// * `base_url` - API host, prepended verbatim to every path
    /// * `version` - SDK version for the `User-Agent` header
    /// * `timeout` - Default per-request timeout; zero means [`DEFAULT_TIMEOUT`]
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `api_key` or `base_url` is
    /// empty, or if either cannot be used in an HTTP header.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        let base_url = base_url.into();
        let version = version.into();

        if api_key.trim().is_empty() {
            return Err(ClientError::Configuration("API key is required".into()));
        }
        if base_url.trim().is_empty() {
            return Err(ClientError::Configuration("API URL is required".into()));
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ClientError::Configuration("API key is not a valid header value".into()))?;
        authorization.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&format!("{CLIENT_NAME}/{version}")).map_err(|_| {
            ClientError::Configuration("version is not a valid header value".into())
        })?;

        let client = Client::builder().build().map_err(|e| {
            ClientError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        let timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };

        Ok(Self {
            client,
            base_url,
            version,
            authorization,
            user_agent,
            timeout,
        })
    }

    /// The API host.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The SDK version sent in `User-Agent`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The default per-request timeout.
    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for `path`. No slash normalization is applied.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Timeout for a call: a non-zero override, else the default.
    #[must_use]
    pub fn effective_timeout(&self, options: Option<&RequestOptions>) -> Duration {
        options
            .and_then(|o| o.timeout)
            .filter(|t| !t.is_zero())
            .unwrap_or(self.timeout)
    }

    /// Headers for a call: defaults first, then caller overrides.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidHeader` if an override is not a valid
    /// header name or value.
    pub fn headers(&self, options: Option<&RequestOptions>) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(USER_AGENT, self.user_agent.clone());

        for (name, value) in options.map(|o| o.headers.as_slice()).unwrap_or_default() {
            let invalid = || ClientError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Send a `GET` request.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn get(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Response, ClientError> {
        self.request::<()>(Method::GET, path, None, options).await
    }

    /// Send a `POST` request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<Response, ClientError> {
        self.request(Method::POST, path, Some(body), options).await
    }

    /// Send a `PUT` request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<Response, ClientError> {
        self.request(Method::PUT, path, Some(body), options).await
    }

    /// Send a `DELETE` request.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn delete(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Response, ClientError> {
        self.request::<()>(Method::DELETE, path, None, options).await
    }

    /// Send one request and return the raw response, whatever its status.
    ///
    /// The request is attempted once; failures are not retried.
    ///
    /// # Errors
    ///
    /// - `Encoding` if `body` cannot be serialized
    /// - `InvalidHeader` if a header override is malformed
    /// - `Transport` if the request fails or times out
    ///
    /// The first two are raised before any network I/O.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> Result<Response, ClientError> {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Encoding)?;
        let headers = self.headers(options)?;
        let timeout = self.effective_timeout(options);
        let url = self.url(path);

        tracing::debug!(method = %method, url = %url, ?timeout, "Sending request");

        let mut builder = self
            .client
            .request(method, &url)
            .headers(headers)
            .timeout(timeout);
        if let Some(payload) = payload {
            builder = builder.body(payload);
        }

        let response = builder.send().await?;

        tracing::debug!(url = %url, status = response.status().as_u16(), "Received response");

        Ok(response)
    }
}
