//! Error types for fetch and conversion operations

use std::fmt;

/// Errors that can occur while resolving and fetching content
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The page, database or block does not exist (or is not shared with the integration)
    NotFound,
    /// The token was rejected
    Unauthorized,
    /// The token is valid but lacks access to the object
    Forbidden,
    /// The content source asked us to slow down
    RateLimited,
    /// The locator could not be classified into a page or database id
    InvalidLocator(String),
    /// Anything else: transport failures, malformed payloads, unexpected statuses
    Other(String),
}

impl FetchError {
    /// Classify an HTTP status code returned by the content source.
    ///
    /// `message` is the human-readable explanation carried by the error body, if any.
    pub fn from_status(status: u16, message: Option<&str>) -> Self {
        match status {
            401 => FetchError::Unauthorized,
            403 => FetchError::Forbidden,
            404 => FetchError::NotFound,
            429 => FetchError::RateLimited,
            _ => match message {
                Some(msg) if !msg.is_empty() => FetchError::Other(format!("HTTP {status}: {msg}")),
                _ => FetchError::Other(format!("HTTP {status}")),
            },
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(
                f,
                "Not found: the object does not exist or has not been shared with the integration"
            ),
            FetchError::Unauthorized => write!(f, "Unauthorized: the API token was rejected"),
            FetchError::Forbidden => {
                write!(f, "Forbidden: the integration lacks access to this object")
            }
            FetchError::RateLimited => write!(f, "Rate limited: too many requests, retry later"),
            FetchError::InvalidLocator(input) => {
                write!(f, "Invalid locator '{input}': expected a Notion URL or id")
            }
            FetchError::Other(msg) => write!(f, "Request failed: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}
