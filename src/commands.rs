//! Named backend commands and the router that dispatches to them.

use crate::backend::{Backend, BackendFuture};
use crate::config::{Config, DEFAULT_TIMEOUT_MS};
use crate::error::{BackendError, CommandError, RequestError};
use crate::http::{execute_request, GroupOutcome, HttpRequest, HttpRequestGroup, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const PERFORM_HTTP_REQUEST: &str = "perform_http_request";
pub const PERFORM_HTTP_REQUEST_GROUP: &str = "perform_http_request_group";

/// Every command the router answers to.
pub const COMMANDS: [&str; 2] = [PERFORM_HTTP_REQUEST, PERFORM_HTTP_REQUEST_GROUP];

/// In-process command host. Also serves as the state of the RPC routes.
#[derive(Clone, Debug)]
pub struct CommandRouter {
    default_timeout: Duration,
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

impl CommandRouter {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.request_timeout())
    }

    pub fn commands(&self) -> &'static [&'static str] {
        &COMMANDS
    }

    pub async fn perform_http_request(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, RequestError> {
        execute_request(&request, self.default_timeout).await
    }

    /// Runs the requests one after another; a failure does not stop the rest.
    pub async fn perform_http_request_group(&self, group: HttpRequestGroup) -> Vec<GroupOutcome> {
        let mut outcomes = Vec::with_capacity(group.requests.len());
        for request in group.requests {
            let outcome = match self.perform_http_request(request).await {
                Ok(response) => GroupOutcome::success(response),
                Err(e) => GroupOutcome::error(e.to_string(), e.code().to_string()),
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    pub async fn dispatch(&self, command: &str, args: Value) -> Result<Value, CommandError> {
        tracing::debug!(command, "Dispatching command");

        match command {
            PERFORM_HTTP_REQUEST => {
                let response = self.perform_http_request(decode_args(args)?).await?;
                encode_result(&response)
            }
            PERFORM_HTTP_REQUEST_GROUP => {
                let outcomes = self.perform_http_request_group(decode_args(args)?).await;
                encode_result(&outcomes)
            }
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn decode_args<T: DeserializeOwned>(args: Value) -> Result<T, CommandError> {
    serde_json::from_value(args).map_err(CommandError::InvalidArguments)
}

fn encode_result<T: Serialize>(result: &T) -> Result<Value, CommandError> {
    serde_json::to_value(result).map_err(CommandError::Encode)
}

impl Backend for CommandRouter {
    fn invoke(&self, command: &str, args: Value) -> BackendFuture<'_> {
        let command = command.to_string();
        Box::pin(async move {
            self.dispatch(&command, args)
                .await
                .map_err(|e| BackendError::Rejected(e.to_string()))
        })
    }
}
