//! Backend abstraction layer.
//!
//! The form never executes HTTP itself. It calls a named procedure on the
//! other side of this trait and treats whatever comes back as an opaque value.

use crate::error::BackendError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Backend::invoke`].
pub type BackendFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, BackendError>> + Send + 'a>>;

/// Asynchronous RPC to a named backend command.
///
/// Implemented in-process by [`CommandRouter`](crate::commands::CommandRouter)
/// and over HTTP by [`RemoteBackend`](super::RemoteBackend); tests plug in
/// their own implementations.
pub trait Backend: Send + Sync {
    /// Invokes `command` with a JSON argument object.
    ///
    /// # Arguments
    ///
    /// * `command` - Name of the procedure, e.g. `perform_http_request`
    /// * `args` - Argument object passed to the procedure
    ///
    /// # Returns
    ///
    /// A future resolving to the command's result, or the reason it failed.
    fn invoke(&self, command: &str, args: Value) -> BackendFuture<'_>;
}
