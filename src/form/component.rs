//! The submitting half of the form.
//!
//! A submission snapshots the draft, invokes `perform_http_request` through a
//! [`Backend`], and overwrites the response text with either the indented
//! result or `Error: <message>`. Submissions are never queued or cancelled;
//! when several overlap, the one that completes last owns the text.

use super::draft::{FormInput, RequestDraft, RequestInvocation};
use crate::backend::Backend;
use crate::commands::PERFORM_HTTP_REQUEST;
use crate::error::BackendError;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

pub struct RequestForm {
    draft: RequestDraft,
    backend: Arc<dyn Backend>,
    response: Arc<watch::Sender<String>>,
}

impl RequestForm {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (response, _) = watch::channel(String::new());
        Self {
            draft: RequestDraft::new(),
            backend,
            response: Arc::new(response),
        }
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RequestDraft {
        &mut self.draft
    }

    /// Change handler for every input of the form.
    pub fn handle(&mut self, input: FormInput) {
        self.draft.apply(input);
    }

    /// Text currently shown beneath the form.
    pub fn response_text(&self) -> String {
        self.response.borrow().clone()
    }

    /// Receiver notified whenever a submission completes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.response.subscribe()
    }

    /// Submits the current draft.
    ///
    /// The returned future owns everything it needs, so the draft may keep
    /// changing while it is pending.
    pub fn send_request(&self) -> impl Future<Output = ()> + Send + 'static {
        let invocation = self.draft.invocation();
        let backend = Arc::clone(&self.backend);
        let response = Arc::clone(&self.response);

        async move {
            tracing::debug!(
                method = %invocation.method,
                url = %invocation.url,
                "Submitting request"
            );

            let text = match submit(backend.as_ref(), &invocation).await {
                Ok(value) => render_value(&value),
                Err(e) => {
                    tracing::debug!(error = %e, "Submission failed");
                    render_error(&e)
                }
            };

            response.send_replace(text);
        }
    }
}

async fn submit(backend: &dyn Backend, invocation: &RequestInvocation) -> Result<Value, BackendError> {
    let args = serde_json::to_value(invocation)?;
    backend.invoke(PERFORM_HTTP_REQUEST, args).await
}

/// Indented serialization of a backend result.
pub fn render_value(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn render_error(error: &BackendError) -> String {
    format!("Error: {}", error)
}
