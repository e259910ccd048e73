//! Response classification and decoding.
//!
//! Every response goes through [`decode`] or [`discard`]. Both take the
//! response by value: the body is read once and dropped on every path.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

/// A received response whose body has not been read yet.
#[async_trait]
pub trait RawResponse: Send {
    /// HTTP status code.
    fn status_code(&self) -> u16;

    /// Read the full body, consuming the response.
    async fn read_body(self) -> Result<Vec<u8>, ClientError>;
}

#[async_trait]
impl RawResponse for reqwest::Response {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    async fn read_body(self) -> Result<Vec<u8>, ClientError> {
        Ok(self.bytes().await?.to_vec())
    }
}

/// Read a response and decode a 2xx body into `T`.
///
/// # Errors
///
/// - `Api` with the verbatim body for any non-2xx status (never parsed)
/// - `Decoding` if a 2xx body is not valid JSON for `T`
/// - `Transport` if the body cannot be read
pub async fn decode<T, R>(response: R) -> Result<T, ClientError>
where
    T: DeserializeOwned,
    R: RawResponse,
{
    let body = read_success(response).await?;
    serde_json::from_slice(&body).map_err(ClientError::Decoding)
}

/// Read a response and check its status, ignoring a 2xx body.
///
/// # Errors
///
/// - `Api` with the verbatim body for any non-2xx status
/// - `Transport` if the body cannot be read
pub async fn discard<R: RawResponse>(response: R) -> Result<(), ClientError> {
    read_success(response).await.map(drop)
}

async fn read_success<R: RawResponse>(response: R) -> Result<Vec<u8>, ClientError> {
    let status = response.status_code();
    let body = response.read_body().await?;

    if (200..300).contains(&status) {
        Ok(body)
    } else {
        tracing::debug!(status, body_len = body.len(), "Non-success response");
        Err(ClientError::Api {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// The `{"data": ..., "error": ...}` wrapper around every payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// The payload, on success. Absent and `null` both read as `None`.
    pub data: Option<T>,
    /// An error message, on failure.
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the envelope carries a non-empty `error`
    /// - `Decoding` if it carries neither `data` nor `error`
    pub fn into_result(self) -> Result<T, ClientError> {
        if let Some(message) = self.error.filter(|m| !m.is_empty()) {
            return Err(ClientError::Rejected { message });
        }

        self.data.ok_or_else(|| {
            ClientError::Decoding(serde::de::Error::custom(
                "response envelope carried neither data nor error",
            ))
        })
    }
}
