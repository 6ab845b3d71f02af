pub mod backend;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod infra;
pub mod routes;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use backend::{Backend, RemoteBackend};
pub use commands::{CommandRouter, PERFORM_HTTP_REQUEST, PERFORM_HTTP_REQUEST_GROUP};
pub use config::Config;
pub use error::{BackendError, CommandError, RequestError};
pub use form::{FormInput, Method, RequestDraft, RequestForm, RequestInvocation};
pub use http::{execute_request, HttpRequest, HttpRequestGroup, HttpResponse};
