//! Error types for XRPC client operations

use bytes::Bytes;

pub use crate::xrpc::EncodeError;

/// Client error type wrapping all possible error conditions
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Transport(
        #[from]
        #[diagnostic_source]
        TransportError,
    ),

    /// Request serialization failed
    #[error("{0}")]
    Encode(
        #[from]
        #[diagnostic_source]
        EncodeError,
    ),

    /// Response deserialization failed
    #[error("{0}")]
    Decode(
        #[from]
        #[diagnostic_source]
        DecodeError,
    ),

    /// HTTP error response
    #[error("HTTP {0}")]
    Http(
        #[from]
        #[diagnostic_source]
        HttpError,
    ),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(
        #[from]
        #[diagnostic_source]
        AuthError,
    ),
}

impl ClientError {
    /// Status code of the response, when the error came from a non-success response.
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Http(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Failure to get any response out of the HTTP client
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// The PDS couldn't be reached
    #[error("Connection error: {0}")]
    #[diagnostic(help("check network connectivity and the --pds URL"))]
    Connect(String),

    /// No response within the client's timeout
    #[error("Request timeout")]
    #[diagnostic(help("raise --timeout or try again later"))]
    Timeout,

    /// The request couldn't be built or sent as given
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Anything the client reports that isn't classified above
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Classify an error returned by an [`HttpClient`](crate::http_client::HttpClient).
    ///
    /// reqwest errors are sorted into timeouts, connection failures and bad
    /// requests; errors from other clients are kept as [`TransportError::Other`].
    pub fn from_client_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(error);
        #[cfg(feature = "reqwest-client")]
        let boxed = match boxed.downcast::<reqwest::Error>() {
            Ok(e) => return Self::from(*e),
            Err(other) => other,
        };
        Self::Other(boxed)
    }
}

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_builder() || e.is_request() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Other(Box::new(e))
        }
    }
}

/// Response deserialization errors
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    /// JSON deserialization failed
    #[error("Failed to deserialize JSON: {0}")]
    #[diagnostic(
        code(skypost::decode_json),
        help("the server answered with an unexpected response shape")
    )]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

/// HTTP error response (non-2xx status codes)
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub struct HttpError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response body if available
    pub body: Option<Bytes>,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(body) = &self.body {
            if let Ok(s) = std::str::from_utf8(body) {
                if !s.is_empty() {
                    write!(f, ":\n{}", s)?;
                }
            }
        }
        Ok(())
    }
}

/// Result type for client operations
pub type XrpcResult<T> = std::result::Result<T, ClientError>;

/// Authentication and authorization errors
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum AuthError {
    /// Access token is malformed and can't be sent as a header
    #[error("Invalid access token")]
    InvalidToken,

    /// Request requires authentication but none was provided
    #[error("No authentication provided, but endpoint requires auth")]
    #[diagnostic(help("log in before uploading blobs or creating records"))]
    NotAuthenticated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_body() {
        let err = HttpError {
            status: http::StatusCode::BAD_REQUEST,
            body: Some(Bytes::from_static(br#"{"error":"InvalidRequest"}"#)),
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("400 Bad Request"));
        assert!(rendered.contains("InvalidRequest"));
    }

    #[test]
    fn status_only_for_http_errors() {
        let not_found = ClientError::from(HttpError {
            status: http::StatusCode::NOT_FOUND,
            body: None,
        });
        assert_eq!(not_found.status(), Some(http::StatusCode::NOT_FOUND));

        let transport = ClientError::from(TransportError::Timeout);
        assert_eq!(transport.status(), None);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("socket closed")]
    struct SocketClosed;

    #[test]
    fn foreign_client_errors_stay_unclassified() {
        let err = TransportError::from_client_error(SocketClosed);
        assert!(matches!(err, TransportError::Other(_)));
        assert_eq!(err.to_string(), "Transport error: socket closed");
    }

    #[cfg(feature = "reqwest-client")]
    #[test]
    fn reqwest_errors_are_classified() {
        let bad = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = TransportError::from_client_error(bad);
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }
}
