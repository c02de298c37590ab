//! Client error type
//!
//! Every operation in this crate fails with [`OcsError`]. Transport-level
//! failures are classified by the response class observed; a body that
//! cannot be parsed as XML is its own category. Application-level failure
//! codes inside a well-formed envelope are not errors here, they stay
//! readable on the returned envelope.

use thiserror::Error;

use crate::ocs::response::RawResponse;

#[derive(Debug, Error)]
pub enum OcsError {
    /// 4xx answer from the server.
    #[error("Client Error: HTTP {} for {}", .response.status(), .response.url())]
    Client { response: RawResponse },

    /// 3xx answer; redirects are never followed.
    #[error("Redirect Error: HTTP {} for {}", .response.status(), .response.url())]
    Redirect { response: RawResponse },

    /// 5xx answer from the server.
    #[error("Server Error: HTTP {} for {}", .response.status(), .response.url())]
    Server { response: RawResponse },

    /// No response was obtained.
    #[error("Transport Error: {0}")]
    Transport(String),

    /// A response arrived but its body is not a valid XML document.
    #[error("Failed parsing response: {message}")]
    Parse {
        response: RawResponse,
        message: String,
    },
}

impl OcsError {
    /// The response that triggered the failure, when one was obtained.
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Client { response }
            | Self::Redirect { response }
            | Self::Server { response }
            | Self::Parse { response, .. } => Some(response),
            Self::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for OcsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn response(status: StatusCode) -> RawResponse {
        RawResponse::new(
            status,
            "http://localhost/ocs/v2.php".to_string(),
            reqwest::header::HeaderMap::new(),
            String::new(),
        )
    }

    #[test]
    fn test_client_error_prefix() {
        let err = OcsError::Client {
            response: response(StatusCode::NOT_FOUND),
        };
        let message = err.to_string();
        assert!(message.starts_with("Client Error: "), "{message}");
        assert!(message.contains("404"));
        assert!(message.contains("http://localhost/ocs/v2.php"));
    }

    #[test]
    fn test_redirect_error_prefix() {
        let err = OcsError::Redirect {
            response: response(StatusCode::MOVED_PERMANENTLY),
        };
        assert!(err.to_string().starts_with("Redirect Error: "));
    }

    #[test]
    fn test_server_error_prefix() {
        let err = OcsError::Server {
            response: response(StatusCode::INTERNAL_SERVER_ERROR),
        };
        assert!(err.to_string().starts_with("Server Error: "));
    }

    #[test]
    fn test_transport_error_prefix() {
        let err = OcsError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport Error: connection refused");
    }

    #[test]
    fn test_parse_error_prefix() {
        let err = OcsError::Parse {
            response: response(StatusCode::OK),
            message: "no root element found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed parsing response: no root element found"
        );
    }

    #[test]
    fn test_response_accessor() {
        let err = OcsError::Server {
            response: response(StatusCode::BAD_GATEWAY),
        };
        assert_eq!(
            err.response().map(RawResponse::status),
            Some(StatusCode::BAD_GATEWAY)
        );

        let err = OcsError::Transport("timed out".to_string());
        assert!(err.response().is_none());
    }
}
