use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised while executing an outgoing HTTP request.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("DNS lookup failed: {0}")]
    Dns(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to read body: {0}")]
    BodyRead(String),

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl RequestError {
    /// Stable machine-readable code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidUrl(_) => "INVALID_URL",
            RequestError::InvalidMethod(_) => "INVALID_METHOD",
            RequestError::InvalidHeader(_) => "INVALID_HEADER",
            RequestError::Dns(_) => "DNS_ERROR",
            RequestError::Connection(_) => "CONNECTION_FAILED",
            RequestError::Tls(_) => "TLS_ERROR",
            RequestError::Http(_) => "HTTP_ERROR",
            RequestError::BodyRead(_) => "BODY_READ_ERROR",
            RequestError::Decompression(_) => "DECOMPRESSION_ERROR",
            RequestError::Timeout(_) => "TIMEOUT",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            RequestError::InvalidUrl(_)
            | RequestError::InvalidMethod(_)
            | RequestError::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            RequestError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Failures raised by the command router.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(serde_json::Error),

    #[error("Failed to encode result: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::UnknownCommand(_) => "UNKNOWN_COMMAND",
            CommandError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            CommandError::Encode(_) => "ENCODE_ERROR",
            CommandError::Request(e) => e.code(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            CommandError::UnknownCommand(_) => StatusCode::NOT_FOUND,
            CommandError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            CommandError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Request(e) => e.status(),
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": {
                "message": self.to_string(),
                "code": self.code(),
            }
        }));

        (self.status(), body).into_response()
    }
}

/// What a [`Backend`](crate::backend::Backend) reports when an invocation fails.
///
/// The form renders every variant the same way, as `Error: <message>`.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The command ran and refused the request.
    #[error("{0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_codes() {
        assert_eq!(RequestError::InvalidUrl("x".into()).code(), "INVALID_URL");
        assert_eq!(RequestError::Timeout("x".into()).code(), "TIMEOUT");
        assert_eq!(
            RequestError::Connection("refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RequestError::InvalidHeader("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_command_error_wraps_request_code() {
        let err = CommandError::from(RequestError::Timeout("slow".into()));
        assert_eq!(err.code(), "TIMEOUT");
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "Timeout: slow");
    }

    #[test]
    fn test_unknown_command_status() {
        let response = CommandError::UnknownCommand("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rejection_displays_message_verbatim() {
        assert_eq!(BackendError::Rejected("timeout".into()).to_string(), "timeout");
    }
}
