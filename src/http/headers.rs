//! Conversion between raw `Name: Value` lines and header maps.

use crate::error::RequestError;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// Parses one raw line. Blank lines yield `None`.
pub fn parse_header_line(line: &str) -> Result<Option<(HeaderName, HeaderValue)>, RequestError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| RequestError::InvalidHeader(format!("missing ':' in `{}`", line)))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| RequestError::InvalidHeader(format!("bad name in `{}`", line)))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|_| RequestError::InvalidHeader(format!("bad value in `{}`", line)))?;

    Ok(Some((name, value)))
}

/// Parses raw lines into a map, keeping repeated names.
pub fn parse_header_lines(lines: &[String]) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();
    for line in lines {
        if let Some((name, value)) = parse_header_line(line)? {
            headers.append(name, value);
        }
    }
    Ok(headers)
}

/// Renders a map back into `name: value` lines. `HeaderMap` keeps repeated
/// names together at the position of their first occurrence.
pub fn header_lines(headers: &HeaderMap) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect()
}
