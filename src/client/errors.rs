use std::{error::Error, fmt::Display};

use http::StatusCode;
use s3viewer_types::error::ErrorDocument;

/// The request for a page did not produce a usable body.
#[derive(Debug)]
pub enum TransportError {
    /// Connecting, sending or waiting for the response failed (includes timeouts)
    Request(reqwest::Error),
    /// Anything but `200 OK`
    Status {
        status: StatusCode,
        /// Present when the server explained itself with an S3 `<Error>` document
        error: Option<ErrorDocument>,
    },
    /// The body could not be read to completion
    Body(reqwest::Error),
}
impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(error) | TransportError::Body(error) => error.status(),
        }
    }
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(error) | TransportError::Body(error) => error.is_timeout(),
            TransportError::Status { .. } => false,
        }
    }
}
impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError::Request(error)
    }
}
impl Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Request(error) if error.is_timeout() => {
                write!(f, "HTTP request timed out: {}", error)?
            }
            TransportError::Request(error) if error.is_connect() => {
                write!(f, "HTTP connection failed: {}", error)?
            }
            TransportError::Request(error) => write!(f, "HTTP request failed: {}", error)?,
            TransportError::Status { status, error } => {
                write!(
                    f,
                    "HTTP Response Error: Status Code: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )?;
                if let Some(error) = error {
                    write!(f, " ({})", error)?;
                }
            }
            TransportError::Body(error) => write!(f, "Failed to read response body: {}", error)?,
        }
        Ok(())
    }
}
impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransportError::Status { .. } => None,
            TransportError::Request(error) | TransportError::Body(error) => Some(error),
        }
    }
}
