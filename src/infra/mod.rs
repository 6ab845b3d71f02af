//! Infrastructure the executor sits on: DNS resolution, TLS connections and
//! content decompression.

pub mod decompressor;
pub mod dns;
pub mod tls;

pub use decompressor::{decompress_body, Decompressor, MultiDecompressor};
pub use dns::{resolve_dns, DnsResult};
pub use tls::{connect_tls, create_tls_config};
