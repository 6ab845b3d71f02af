//! DNS resolution infrastructure.

use crate::error::RequestError;
use hickory_resolver::{config::*, TokioAsyncResolver};
use std::{net::IpAddr, sync::Arc};
use tokio::sync::OnceCell;

/// Resolved addresses for a host.
#[derive(Debug)]
pub struct DnsResult {
    pub ips: Vec<IpAddr>,
}

impl DnsResult {
    /// First address, which is the one the executor dials.
    pub fn primary(&self) -> Option<IpAddr> {
        self.ips.first().copied()
    }
}

/// Global DNS resolver instance for connection reuse.
static DNS_RESOLVER: OnceCell<Arc<TokioAsyncResolver>> = OnceCell::const_new();

async fn get_resolver() -> Arc<TokioAsyncResolver> {
    DNS_RESOLVER
        .get_or_init(|| async {
            Arc::new(TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ))
        })
        .await
        .clone()
}

/// Resolves `host` with hickory-resolver. IP literals never hit the network.
pub async fn resolve_dns(host: &str) -> Result<DnsResult, RequestError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(DnsResult { ips: vec![ip] });
    }

    let resolver = get_resolver().await;
    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| RequestError::Dns(format!("{}: {}", host, e)))?;

    let ips: Vec<IpAddr> = response.iter().collect();
    if ips.is_empty() {
        return Err(RequestError::Dns(format!("{}: no addresses", host)));
    }

    Ok(DnsResult { ips })
}
