//! Command backend reached over HTTP.

use super::service::{Backend, BackendFuture};
use crate::error::BackendError;
use reqwest::StatusCode;
use serde_json::Value;

/// Invokes commands on a `reqly serve` host via `POST {base}/api/invoke/{command}`.
#[derive(Clone, Debug)]
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}/api/invoke/{}", self.base_url, command)
    }
}

impl Backend for RemoteBackend {
    fn invoke(&self, command: &str, args: Value) -> BackendFuture<'_> {
        let endpoint = self.endpoint(command);

        Box::pin(async move {
            tracing::debug!(endpoint = %endpoint, "Invoking remote command");

            let response = self.client.post(&endpoint).json(&args).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if status.is_success() {
                return Ok(serde_json::from_str(&body)?);
            }

            Err(BackendError::Rejected(rejection_message(&body, status)))
        })
    }
}

/// Pulls `error.message` out of an error body, falling back to the status.
fn rejection_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|payload| {
            payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("backend responded with {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandRouter;
    use crate::routes;
    use crate::test_support::{echo_router, spawn_app};
    use serde_json::json;
    use std::time::Duration;

    async fn spawn_backend() -> RemoteBackend {
        let router = CommandRouter::new(Duration::from_secs(5));
        let addr = spawn_app(routes::app(router)).await;
        RemoteBackend::new(format!("http://{}/", addr))
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let backend = RemoteBackend::new("http://localhost:3000/");
        assert_eq!(backend.base_url(), "http://localhost:3000");
        assert_eq!(
            backend.endpoint("perform_http_request"),
            "http://localhost:3000/api/invoke/perform_http_request"
        );
    }

    #[test]
    fn test_rejection_message_fallbacks() {
        let body = r#"{"success":false,"error":{"message":"Unknown command: x","code":"UNKNOWN_COMMAND"}}"#;
        assert_eq!(rejection_message(body, StatusCode::NOT_FOUND), "Unknown command: x");
        assert_eq!(
            rejection_message("<html>", StatusCode::BAD_GATEWAY),
            "backend responded with 502 Bad Gateway"
        );
    }

    #[tokio::test]
    async fn test_unknown_command_is_rejected() {
        let backend = spawn_backend().await;

        let err = backend.invoke("nope", json!({})).await.unwrap_err();

        assert_eq!(err.to_string(), "Unknown command: nope");
    }

    #[tokio::test]
    async fn test_performs_request_through_host() {
        let backend = spawn_backend().await;
        let target = spawn_app(echo_router()).await;

        let value = backend
            .invoke(
                "perform_http_request",
                json!({
                    "url": format!("http://{}/echo", target),
                    "method": "POST",
                    "headers": ["X-Trace: abc"],
                    "body": "ping",
                }),
            )
            .await
            .unwrap();

        assert_eq!(value["status"], json!(200));
        let echoed: Value = serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(echoed["method"], json!("POST"));
        assert_eq!(echoed["body"], json!("ping"));
        assert_eq!(echoed["headers"]["x-trace"], json!("abc"));
    }

    #[tokio::test]
    async fn test_request_failure_is_rejected_with_message() {
        let backend = spawn_backend().await;

        let err = backend
            .invoke(
                "perform_http_request",
                json!({ "url": "", "method": "GET", "headers": [], "body": "" }),
            )
            .await
            .unwrap_err();

        match err {
            BackendError::Rejected(message) => assert!(message.starts_with("Invalid URL")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let addr = crate::test_support::unused_addr().await;
        let backend = RemoteBackend::new(format!("http://{}", addr));

        let err = backend.invoke("perform_http_request", json!({})).await.unwrap_err();

        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_non_json_success_is_payload_error() {
        let app = axum::Router::new().route(
            "/api/invoke/:command",
            axum::routing::post(|| async { "not json" }),
        );
        let addr = spawn_app(app).await;
        let backend = RemoteBackend::new(format!("http://{}", addr));

        let err = backend.invoke("perform_http_request", json!({})).await.unwrap_err();

        assert!(matches!(err, BackendError::Payload(_)));
    }
}
