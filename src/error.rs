//! Error types and result handling for PVO operations.
//!
//! This module defines the error handling system used throughout the crate.
//! All fallible operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **HTTP Errors**: The server answered with a non-success status
//! - **Network Errors**: The request was sent but no response came back
//! - **Request Errors**: The request could not be built or sent at all
//! - **JSON Errors**: Payloads or stored values that fail to decode
//! - **Storage Errors**: Persisted key-value storage failures
//! - **Validation Errors**: Malformed input such as history items without an id
//! - **Config Errors**: Missing or invalid client configuration
//!
//! Only the first three ever reach a caller of the API modules. Storage and
//! validation errors are logged and absorbed where they occur.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pvo::prelude::*;
//! use pvo::error::{Error, Result};
//!
//! # async fn example(client: ApiClient) -> Result<()> {
//! let comics = ComicsApi::new(client);
//!
//! match comics.get(&ItemId::from(42)).await {
//!     Ok(comic) => println!("{}", comic.name),
//!     Err(Error::Http { status: 404, .. }) => println!("no such comic"),
//!     Err(Error::Network(e)) => println!("server unreachable: {}", e),
//!     Err(e) => println!("other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Type alias for Results with PVO errors.
///
/// ```rust
/// use pvo::{Error, Result};
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::validation("history item must have an id and type"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all PVO operations.
///
/// # Variants
///
/// * [`Http`](Error::Http) - Server responded with an error status
/// * [`Network`](Error::Network) - Request sent, no response received
/// * [`Request`](Error::Request) - Request never sent
/// * [`Json`](Error::Json) - JSON encoding or decoding errors
/// * [`Io`](Error::Io) - File system errors from the file-backed store
/// * [`Storage`](Error::Storage) - Other storage backend errors
/// * [`Validation`](Error::Validation) - Malformed input
/// * [`Config`](Error::Config) - Configuration errors
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a status outside the 2xx range.
    ///
    /// `detail` carries the server's own explanation when the error body
    /// contained a `detail` field.
    #[error("HTTP {status}{}", fmt_detail(.detail))]
    Http { status: u16, detail: Option<String> },

    /// Network-related errors from HTTP operations.
    ///
    /// The request left the client but no response arrived: connection
    /// refused, DNS failure, timeout, or a transport error mid-response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request could not be constructed or was never sent.
    ///
    /// ```rust
    /// use pvo::Error;
    ///
    /// let error = Error::request("relative URL without a base");
    /// ```
    #[error("Request error: {0}")]
    Request(String),

    /// JSON serialization and deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system errors from the file-backed key-value store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend errors that are not plain IO.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before any work was done.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed configuration.
    #[error("Config error: {0}")]
    Config(String),
}

fn fmt_detail(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl Error {
    /// Creates an HTTP status error with an optional server-supplied detail.
    ///
    /// ```rust
    /// use pvo::Error;
    ///
    /// let error = Error::http(404, None);
    /// assert_eq!(error.status(), Some(404));
    /// ```
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Error::Http { status, detail }
    }

    /// Creates a request construction error.
    pub fn request(msg: impl Into<String>) -> Self {
        Error::Request(msg.into())
    }

    /// Creates a storage error with the given message.
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Creates a validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Returns the HTTP status code if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
