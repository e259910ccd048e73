//! Client error types.

use abacatepay_core::ValidationErrors;

/// Errors that can occur when using the AbacatePay client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid configuration (missing API key or base URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request body failed client-side validation. No request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The request body could not be serialized. No request was sent.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// A per-request header override is not a valid HTTP header.
    #[error("invalid header override: {name}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The request could not be sent, timed out, or its body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server returned a non-2xx response.
    #[error("API error: status {status}, body: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, verbatim.
        body: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decoding(#[source] serde_json::Error),

    /// A 2xx response envelope carried an error message.
    #[error("request rejected: {message}")]
    Rejected {
        /// The envelope's error string.
        message: String,
    },
}

impl ClientError {
    /// Whether the request was aborted by its timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// HTTP status of an `Api` error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before any network I/O.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::Validation(_)
                | Self::Encoding(_)
                | Self::InvalidHeader { .. }
        )
    }
}
