use super::method::Method;
use serde::Serialize;

/// The in-progress, unvalidated values the user is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDraft {
    url: String,
    method: Method,
    headers: String,
    body: String,
}

/// A change coming from one of the form's controlled inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Url(String),
    Method(Method),
    Headers(String),
    Body(String),
}

/// Argument object handed to the `perform_http_request` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestInvocation {
    pub url: String,
    pub method: Method,
    pub headers: Vec<String>,
    pub body: String,
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &str {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn set_headers(&mut self, headers: impl Into<String>) {
        self.headers = headers.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn apply(&mut self, input: FormInput) {
        match input {
            FormInput::Url(url) => self.set_url(url),
            FormInput::Method(method) => self.set_method(method),
            FormInput::Headers(headers) => self.set_headers(headers),
            FormInput::Body(body) => self.set_body(body),
        }
    }

    pub fn header_lines(&self) -> Vec<String> {
        split_header_lines(&self.headers)
    }

    /// Snapshot of the draft as command arguments. The URL is passed through
    /// untouched, empty or not; validation belongs to the backend.
    pub fn invocation(&self) -> RequestInvocation {
        RequestInvocation {
            url: self.url.clone(),
            method: self.method,
            headers: self.header_lines(),
            body: self.body.clone(),
        }
    }
}

/// Splits header text into trimmed, non-blank lines, keeping their order.
pub fn split_header_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_lines_dropped_in_order() {
        assert_eq!(split_header_lines("A: 1\n\nB: 2\n   \n"), vec!["A: 1", "B: 2"]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        assert_eq!(
            split_header_lines("  Accept: */*\r\n\tX-Id: 7  "),
            vec!["Accept: */*", "X-Id: 7"]
        );
        assert!(split_header_lines("").is_empty());
    }

    #[test]
    fn test_new_draft_is_empty() {
        let draft = RequestDraft::new();
        assert_eq!(draft.url(), "");
        assert_eq!(draft.method(), Method::Get);
        assert_eq!(draft.headers(), "");
        assert_eq!(draft.body(), "");
    }

    #[test]
    fn test_apply_inputs() {
        let mut draft = RequestDraft::new();
        draft.apply(FormInput::Url("https://example.com".into()));
        draft.apply(FormInput::Method(Method::Put));
        draft.apply(FormInput::Headers("Content-Type: text/plain\n".into()));
        draft.apply(FormInput::Body("hi".into()));

        assert_eq!(
            draft.invocation(),
            RequestInvocation {
                url: "https://example.com".into(),
                method: Method::Put,
                headers: vec!["Content-Type: text/plain".into()],
                body: "hi".into(),
            }
        );
    }

    #[test]
    fn test_invocation_wire_shape() {
        let mut draft = RequestDraft::new();
        draft.set_method(Method::Post);
        draft.set_headers("A: 1\n\nB: 2\n   \n");

        let value = serde_json::to_value(draft.invocation()).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "",
                "method": "POST",
                "headers": ["A: 1", "B: 2"],
                "body": "",
            })
        );
    }
}
