//! HTTP client for the PVO REST API.
//!
//! This module provides the networking layer used by every API module:
//!
//! - **HTTP Client**: a configured `reqwest` client with a fixed base URL and
//!   timeout
//! - **Payload Unwrapping**: successful responses resolve to their JSON
//!   payload only
//! - **Feedback**: exactly one user-visible notice per failed request, and a
//!   success notice for state-changing requests (see [`feedback`])
//! - **Notifiers**: the channel notices are delivered through (see
//!   [`notify`])
//!
//! Errors are re-raised after they have been announced, so call sites can
//! still run their own recovery without notifying the user a second time.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pvo::config::ClientConfig;
//! use pvo::net::{ApiClient, RequestOptions};
//! use pvo::types::MutationResponse;
//!
//! # async fn example() -> pvo::Result<()> {
//! let client = ApiClient::new(ClientConfig::new("http://localhost:8000/api"))?;
//!
//! let comics: serde_json::Value = client.get("/comics/", RequestOptions::new()).await?;
//! let deleted: MutationResponse = client
//!     .delete("/comics/7/", RequestOptions::new().success_message("漫画删除成功"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Method, multipart::Form};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    types::ListParams,
};

pub mod feedback;
pub mod notify;

pub use notify::{ChannelNotifier, LogNotifier, Notice, NoticeKind, Notifier};

/// Body sent with a request.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Per-request options: query parameters, body and success message.
///
/// ```rust
/// use pvo::net::RequestOptions;
/// use pvo::types::ListParams;
///
/// let options = RequestOptions::new()
///     .query(ListParams::new().with("type", "author"))
///     .json(serde_json::json!({"is_r18": true}))
///     .success_message("标签已更新");
/// ```
#[derive(Debug, Default)]
pub struct RequestOptions {
    query: ListParams,
    body: RequestBody,
    success_message: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query string parameters.
    pub fn query(mut self, params: ListParams) -> Self {
        self.query = params;
        self
    }

    /// Sends `value` as a JSON body.
    pub fn json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Sends a multipart form body, used for uploads.
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Message announced when a state-changing request succeeds.
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }
}

/// HTTP client bound to one API base URL.
///
/// `ApiClient` is cheap to clone; clones share the connection pool and the
/// notifier.
///
/// # Features
///
/// - **Base URL**: endpoint paths are appended to the configured base URL
/// - **Timeout**: every request is bounded by the configured timeout
/// - **Notifications**: outcomes are announced through a [`Notifier`]
/// - **Error Classification**: status errors, unreachable servers and
///   unsendable requests map to distinct [`Error`] variants
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client from the given configuration.
    ///
    /// Notices go to [`LogNotifier`] until
    /// [`with_notifier`](ApiClient::with_notifier) is called.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If the underlying HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            notifier: Arc::new(LogNotifier),
        })
    }

    /// Replaces the notifier that receives success and error notices.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.send(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.send(Method::POST, path, options).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.send(Method::PUT, path, options).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.send(Method::PATCH, path, options).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.send(Method::DELETE, path, options).await
    }

    /// Performs a request, announces its outcome and unwraps the payload.
    ///
    /// # Errors
    ///
    /// * [`Error::Http`] - The server answered with a non-2xx status
    /// * [`Error::Network`] - The server could not be reached or timed out
    /// * [`Error::Request`] - The request could not be built
    /// * [`Error::Json`] - The payload does not match `T`
    ///
    /// Every error is announced through the notifier before it is returned,
    /// except a payload mismatch on a request whose success notice has
    /// already gone out.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let RequestOptions {
            query,
            body,
            success_message,
        } = options;

        let payload = match self.execute(method.clone(), path, &query, body).await {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("{} {} failed: {}", method, path, err);
                self.notifier
                    .notify(Notice::error(feedback::failure_message(&err)));
                return Err(err);
            }
        };

        let success = feedback::success_message(&method, &payload, success_message.as_deref());
        let announced = success.is_some();
        if let Some(message) = success {
            self.notifier.notify(Notice::success(message));
        }

        serde_json::from_value(payload).map_err(|e| {
            let err = Error::from(e);
            log::error!("{} {} returned an unexpected payload: {}", method, path, err);
            if !announced {
                self.notifier
                    .notify(Notice::error(feedback::failure_message(&err)));
            }
            err
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &ListParams,
        body: RequestBody,
    ) -> Result<Value> {
        let url = self.url(path)?;
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(classify_send_error)?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| body.get("detail").and_then(detail_text));
            return Err(Error::http(status.as_u16(), detail));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        // Non-JSON bodies are handed through as a plain string payload.
        Ok(serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }

    fn url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| Error::request(format!("Invalid URL {}: {}", raw, e)))
    }
}

/// Splits send failures into "never sent" and "sent, no response".
fn classify_send_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::request(err.to_string())
    } else {
        Error::Network(err)
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
