//! HTTP request execution with detailed timing and TLS information.
//!
//! One request, one connection: resolve, connect, optionally wrap in TLS,
//! speak HTTP/1.1, read the whole body. Redirects are returned as-is.

use super::headers::parse_header_lines;
use super::response_builder::{build_response, ResponseParts};
use super::types::{HttpRequest, HttpResponse};
use crate::error::RequestError;
use crate::infra::{connect_tls, resolve_dns};
use crate::shared::{tls_info, DetailedTiming};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{self, HeaderMap, HeaderValue},
    Method, Request, StatusCode, Version,
};
use hyper_util::rt::TokioIo;
use std::{future::Future, net::SocketAddr, time::Duration};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpStream,
    time::timeout,
};

/// Where a request goes, derived from its URL.
#[derive(Debug, PartialEq, Eq)]
struct Target {
    url: String,
    /// Hostname or bare IP literal, used for DNS and SNI.
    host: String,
    /// Value of the `Host` header.
    authority: String,
    port: u16,
    /// Origin-form request target: path plus query.
    path: String,
    is_https: bool,
}

impl Target {
    fn from_url(raw: &str) -> Result<Self, RequestError> {
        let parsed = url::Url::parse(raw.trim())
            .map_err(|e| RequestError::InvalidUrl(format!("`{}`: {}", raw, e)))?;

        let is_https = match parsed.scheme() {
            "https" => true,
            "http" => false,
            other => {
                return Err(RequestError::InvalidUrl(format!(
                    "unsupported scheme `{}`",
                    other
                )))
            }
        };

        let host_str = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| RequestError::InvalidUrl("URL has no host".to_string()))?;
        let port = parsed
            .port_or_known_default()
            .unwrap_or(if is_https { 443 } else { 80 });
        let authority = match parsed.port() {
            Some(p) => format!("{}:{}", host_str, p),
            None => host_str.to_string(),
        };

        let path = match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        };
        let path = if path.is_empty() { "/".to_string() } else { path };

        Ok(Self {
            url: parsed.to_string(),
            host: host_str.trim_start_matches('[').trim_end_matches(']').to_string(),
            authority,
            port,
            path,
            is_https,
        })
    }
}

/// Accepts any method token; the form's closed set is not enforced here.
fn parse_method(raw: &str) -> Result<Method, RequestError> {
    Method::from_bytes(raw.trim().to_uppercase().as_bytes())
        .map_err(|_| RequestError::InvalidMethod(format!("`{}`", raw)))
}

fn build_http_request(
    method: Method,
    target: &Target,
    headers: HeaderMap,
    body: Option<&str>,
) -> Result<Request<Full<Bytes>>, RequestError> {
    let mut req_builder = Request::builder().method(method).uri(&target.path);

    if !headers.contains_key(header::HOST) {
        req_builder = req_builder.header(header::HOST, &target.authority);
    }
    if !headers.contains_key(header::ACCEPT_ENCODING) {
        req_builder = req_builder.header(
            header::ACCEPT_ENCODING,
            HeaderValue::from_static("gzip, deflate, br"),
        );
    }
    if let Some(map) = req_builder.headers_mut() {
        map.extend(headers);
    }

    let body = Bytes::from(body.unwrap_or_default().to_owned());
    req_builder
        .body(Full::new(body))
        .map_err(|e| RequestError::Http(format!("failed to build request: {}", e)))
}

async fn within<F: Future>(limit: Duration, phase: &str, fut: F) -> Result<F::Output, RequestError> {
    timeout(limit, fut)
        .await
        .map_err(|_| RequestError::Timeout(format!("{} timed out after {}ms", phase, limit.as_millis())))
}

struct Exchange {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

/// Sends one request over an established stream and reads the full response.
async fn exchange<S>(
    stream: S,
    request: Request<Full<Bytes>>,
    limit: Duration,
    timing: &mut DetailedTiming,
) -> Result<Exchange, RequestError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .map_err(|e| RequestError::Http(format!("handshake failed: {}", e)))?;

    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::warn!("Connection error: {}", e);
        }
    });

    timing.start_request();
    let response = within(limit, "Response", sender.send_request(request))
        .await?
        .map_err(|e| RequestError::Http(format!("request failed: {}", e)))?;
    timing.mark_ttfb();

    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();

    timing.start_download();
    let body = within(limit, "Body read", response.into_body().collect())
        .await?
        .map_err(|e| RequestError::BodyRead(e.to_string()))?
        .to_bytes();
    timing.end_download();

    Ok(Exchange {
        status,
        version,
        headers,
        body,
    })
}

/// Executes `request`, applying `default_timeout` to each phase unless the
/// request carries its own.
pub async fn execute_request(
    request: &HttpRequest,
    default_timeout: Duration,
) -> Result<HttpResponse, RequestError> {
    let mut timing = DetailedTiming::new();

    let target = Target::from_url(&request.url)?;
    let method = parse_method(&request.method)?;
    let headers = parse_header_lines(&request.headers)?;
    let outgoing = build_http_request(method, &target, headers, request.body.as_deref())?;

    let limit = request
        .timeout
        .filter(|t| *t > 0)
        .map(Duration::from_millis)
        .unwrap_or(default_timeout);

    tracing::debug!(
        method = %request.method,
        url = %target.url,
        "Executing request"
    );

    timing.start_dns();
    let dns = resolve_dns(&target.host).await?;
    timing.end_dns();

    let server_ip = dns
        .primary()
        .ok_or_else(|| RequestError::Dns(format!("{}: no addresses", target.host)))?;
    let addr = SocketAddr::new(server_ip, target.port);

    timing.start_tcp();
    let tcp_stream = within(limit, "TCP connect", TcpStream::connect(addr))
        .await?
        .map_err(|e| RequestError::Connection(format!("{}: {}", addr, e)))?;
    timing.end_tcp();

    let (exchanged, tls) = if target.is_https {
        timing.start_tls();
        let tls_stream = within(limit, "TLS handshake", connect_tls(tcp_stream, &target.host)).await??;
        timing.end_tls();

        let tls = tls_info(tls_stream.get_ref().1);
        (exchange(tls_stream, outgoing, limit, &mut timing).await?, Some(tls))
    } else {
        (exchange(tcp_stream, outgoing, limit, &mut timing).await?, None)
    };

    build_response(ResponseParts {
        status: exchanged.status,
        version: exchanged.version,
        headers: exchanged.headers,
        body: exchanged.body,
        url: target.url,
        server_ip: Some(server_ip),
        timing,
        tls,
    })
}
