//! Turns raw response parts into an [`HttpResponse`].

use super::headers::header_lines;
use super::types::{HttpResponse, TlsInfo};
use crate::error::RequestError;
use crate::infra::decompress_body;
use crate::shared::DetailedTiming;
use base64::Engine;
use hyper::{body::Bytes, header, HeaderMap, StatusCode, Version};
use std::net::IpAddr;

/// Whether a body of this content type should be shipped as base64.
/// Responses without a content type are treated as text.
pub fn is_binary_content(content_type: Option<&str>) -> bool {
    let ct = match content_type {
        Some(ct) => ct.to_lowercase(),
        None => return false,
    };

    let text_types = [
        "text/",
        "application/json",
        "application/xml",
        "application/javascript",
        "application/x-javascript",
        "application/ecmascript",
        "application/x-www-form-urlencoded",
        "+json",
        "+xml",
    ];

    !text_types.iter().any(|t| ct.contains(t))
}

pub fn version_to_string(version: Version) -> String {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/1.1",
    }
    .to_string()
}

pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

/// Everything read off the wire for one exchange.
pub struct ResponseParts {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub url: String,
    pub server_ip: Option<IpAddr>,
    pub timing: DetailedTiming,
    pub tls: Option<TlsInfo>,
}

/// Decodes the body and assembles the command result.
pub fn build_response(parts: ResponseParts) -> Result<HttpResponse, RequestError> {
    let ResponseParts {
        status,
        version,
        headers,
        body,
        url,
        server_ip,
        timing,
        tls,
    } = parts;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let content_encoding = headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok());

    let decoded = decompress_body(&body, content_encoding)?;
    let is_binary = is_binary_content(content_type);

    let (text, body_base64) = if is_binary {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&decoded);
        (String::new(), Some(b64))
    } else {
        (String::from_utf8_lossy(&decoded).into_owned(), None)
    };

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: status_text(status),
        protocol: version_to_string(version),
        headers: header_lines(&headers),
        body: text,
        body_base64,
        is_binary,
        size: decoded.len(),
        url,
        server_ip: server_ip.map(|ip| ip.to_string()),
        timing: timing.to_timing_info(),
        tls,
    })
}
