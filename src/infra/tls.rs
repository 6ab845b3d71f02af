//! TLS client setup.

use crate::error::RequestError;
use rustls::pki_types::ServerName;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::{client::TlsStream, TlsConnector};

/// Client configuration trusting Mozilla's root store, ring crypto provider,
/// TLS 1.2 and 1.3, no client authentication.
pub fn create_tls_config() -> Result<Arc<rustls::ClientConfig>, RequestError> {
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| RequestError::Tls(e.to_string()))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Arc::new(config))
}

/// Runs the TLS handshake over an established TCP connection.
pub async fn connect_tls(
    tcp_stream: TcpStream,
    server_name: &str,
) -> Result<TlsStream<TcpStream>, RequestError> {
    let connector = TlsConnector::from(create_tls_config()?);

    let server_name = ServerName::try_from(server_name.to_string())
        .map_err(|e| RequestError::Tls(format!("invalid server name: {}", e)))?;

    connector
        .connect(server_name, tcp_stream)
        .await
        .map_err(|e| RequestError::Tls(format!("handshake failed: {}", e)))
}
