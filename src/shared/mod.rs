//! Helpers shared by the executor and the response builder.

pub mod certificate;
pub mod timing;

pub use certificate::{summarize_certificate, tls_info, CertificateSummary};
pub use timing::DetailedTiming;
