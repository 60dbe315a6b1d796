//! # HTTP Client Utilities
//!
//! Shared HTTP plumbing for provider adapters.
//!
//! Wraps `reqwest` with a request timeout, JSON helpers and a single place
//! where transport failures and HTTP status codes become
//! [`ProviderError`]s.
//!
//! # Examples
//!
//! ```ignore
//! use remittance_hub::infrastructure::providers::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let response: MyResponse = client.get_with_headers(url, headers).await?;
//! ```

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for provider adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client that sends `default_headers` on every request.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                ProviderError::internal_error(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Creates a client that authenticates with `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Authentication` if the token is not a valid
    /// header value, or `ProviderError::InternalError` if the client cannot
    /// be created.
    pub fn with_bearer_token(timeout_ms: u64, token: &str) -> ProviderResult<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ProviderError::authentication("API token is not a valid header value"))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Self::with_headers(timeout_ms, headers)
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails, a status-mapped error
    /// on non-2xx, or `ProviderError::ProtocolError` if the body cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        self.send(self.client.get(url)).await
    }

    /// Makes a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> ProviderResult<T> {
        self.send(self.client.get(url).query(params)).await
    }

    /// Makes a GET request with additional headers.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_headers<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> ProviderResult<T> {
        self.send(self.client.get(url).headers(headers)).await
    }

    /// Makes a GET request where 404 means "no such resource" rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get); 404 yields `Ok(None)`.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> ProviderResult<Option<T>> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(response).await.map(Some)
    }

    /// Makes a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ProviderResult<T> {
        self.send(self.client.post(url).json(body)).await
    }

    /// Makes a POST request with an already-serialized JSON body.
    ///
    /// Used by signed APIs where the signature covers the exact bytes sent.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn post_raw<T: DeserializeOwned>(
        &self,
        url: &str,
        body: String,
        headers: HeaderMap,
    ) -> ProviderResult<T> {
        let request = self
            .client
            .post(url)
            .headers(headers)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ProviderResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Checks the status and deserializes the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ProviderResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::protocol_error(format!("failed to parse response: {e}")))
        } else {
            let retry_after_ms = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1000));
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body, retry_after_ms))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            ProviderError::connection(format!("connection failed: {error}"))
        } else if error.is_decode() {
            ProviderError::protocol_error(format!("failed to decode response: {error}"))
        } else {
            ProviderError::connection(format!("HTTP request failed: {error}"))
        }
    }
}

/// Maps a non-success HTTP status to a [`ProviderError`].
#[must_use]
pub fn map_status_error(status: StatusCode, body: &str, retry_after_ms: Option<u64>) -> ProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(format!("bad request ({status}): {body}"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::authentication(format!("authentication failed: {body}"))
        }
        StatusCode::NOT_FOUND => ProviderError::protocol_error(format!("resource not found: {body}")),
        StatusCode::TOO_MANY_REQUESTS => match retry_after_ms {
            Some(ms) => ProviderError::rate_limited_with_retry("rate limit exceeded", ms),
            None => ProviderError::rate_limited("rate limit exceeded"),
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(format!("upstream timeout ({status}): {body}"))
        }
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
            ProviderError::connection(format!("server unavailable ({status}): {body}"))
        }
        s if s.is_server_error() => {
            ProviderError::internal_error(format!("server error ({status}): {body}"))
        }
        _ => ProviderError::protocol_error(format!("HTTP error ({status}): {body}")),
    }
}
