use serde::{Deserialize, Serialize};

/// Arguments of the `perform_http_request` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    /// Raw `Name: Value` lines.
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Per-phase timeout in milliseconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Arguments of the `perform_http_request_group` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequestGroup {
    pub requests: Vec<HttpRequest>,
}

/// Phase durations in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingInfo {
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttfb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<u64>,
}

/// Negotiated TLS session and leaf certificate details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsInfo {
    pub protocol: String,
    pub cipher: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<u64>,
}

/// Result of the `perform_http_request` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub protocol: String,
    /// `name: value` lines grouped by name in first-seen order; values of a
    /// repeated name stay in the order they were received.
    pub headers: Vec<String>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_base64: Option<String>,
    pub is_binary: bool,
    /// Decoded body size in bytes.
    pub size: usize,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_ip: Option<String>,
    pub timing: TimingInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    pub message: String,
    pub code: String,
}

/// Outcome of one request inside a group.
#[derive(Debug, Serialize)]
pub struct GroupOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<HttpResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorData>,
}

impl GroupOutcome {
    pub fn success(response: HttpResponse) -> Self {
        Self {
            ok: true,
            response: Some(response),
            error: None,
        }
    }

    pub fn error(message: String, code: String) -> Self {
        Self {
            ok: false,
            response: None,
            error: Some(ErrorData { message, code }),
        }
    }
}
