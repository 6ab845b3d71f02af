//! TLS session and certificate details for responses.

use crate::http::types::TlsInfo;
use x509_parser::prelude::*;

/// Subject, issuer and validity window of a DER-encoded certificate.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CertificateSummary {
    pub subject: Option<String>,
    pub issuer: Option<String>,
    pub valid_from: Option<u64>,
    pub valid_to: Option<u64>,
}

/// Unparseable input yields an empty summary.
pub fn summarize_certificate(der: &[u8]) -> CertificateSummary {
    let Ok((_, cert)) = X509Certificate::from_der(der) else {
        return CertificateSummary::default();
    };

    let validity = cert.validity();
    CertificateSummary {
        subject: Some(cert.subject().to_string()),
        issuer: Some(cert.issuer().to_string()),
        valid_from: u64::try_from(validity.not_before.timestamp()).ok(),
        valid_to: u64::try_from(validity.not_after.timestamp()).ok(),
    }
}

pub fn protocol_name(version: Option<rustls::ProtocolVersion>) -> String {
    match version {
        Some(rustls::ProtocolVersion::TLSv1_2) => "TLS 1.2",
        Some(rustls::ProtocolVersion::TLSv1_3) => "TLS 1.3",
        _ => "TLS",
    }
    .to_string()
}

/// Collects session details from a completed handshake.
pub fn tls_info(conn: &rustls::ClientConnection) -> TlsInfo {
    let cipher = conn
        .negotiated_cipher_suite()
        .map(|cs| format!("{:?}", cs.suite()))
        .unwrap_or_else(|| "Unknown".to_string());

    let leaf = conn
        .peer_certificates()
        .and_then(|certs| certs.first())
        .map(|cert| summarize_certificate(cert.as_ref()))
        .unwrap_or_default();

    TlsInfo {
        protocol: protocol_name(conn.protocol_version()),
        cipher,
        subject: leaf.subject,
        issuer: leaf.issuer,
        valid_from: leaf.valid_from,
        valid_to: leaf.valid_to,
    }
}
