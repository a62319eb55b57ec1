use crate::executor::TransportError;

/// Errors returned by [`Reference`](crate::Reference) operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The value could not be serialized; no request was sent.
    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The store answered with a non-2xx status.
    #[error("HTTP {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// A 2xx body did not match the requested shape.
    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// The HTTP status code, if this is an `HttpStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
