//! Response body decompression for gzip, deflate and brotli.

use crate::error::RequestError;
use std::io::Read;

/// A decoder for one `Content-Encoding`.
pub trait Decompressor: Send + Sync {
    fn encoding(&self) -> &'static str;

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, RequestError>;
}

#[derive(Default)]
pub struct GzipDecompressor;

impl Decompressor for GzipDecompressor {
    fn encoding(&self) -> &'static str {
        "gzip"
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, RequestError> {
        read_all(flate2::read::GzDecoder::new(data), self.encoding())
    }
}

#[derive(Default)]
pub struct DeflateDecompressor;

impl Decompressor for DeflateDecompressor {
    fn encoding(&self) -> &'static str {
        "deflate"
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, RequestError> {
        read_all(flate2::read::DeflateDecoder::new(data), self.encoding())
    }
}

#[derive(Default)]
pub struct BrotliDecompressor;

impl Decompressor for BrotliDecompressor {
    fn encoding(&self) -> &'static str {
        "br"
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, RequestError> {
        let mut out = Vec::new();
        brotli::BrotliDecompress(&mut std::io::Cursor::new(data), &mut out)
            .map_err(|e| RequestError::Decompression(format!("br: {}", e)))?;
        Ok(out)
    }
}

fn read_all(mut reader: impl Read, encoding: &str) -> Result<Vec<u8>, RequestError> {
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(|e| RequestError::Decompression(format!("{}: {}", encoding, e)))?;
    Ok(out)
}

/// Picks the decoder matching a `Content-Encoding` value.
#[derive(Default)]
pub struct MultiDecompressor {
    gzip: GzipDecompressor,
    deflate: DeflateDecompressor,
    brotli: BrotliDecompressor,
}

impl MultiDecompressor {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_encoding(&self, encoding: &str) -> Option<&dyn Decompressor> {
        let decoders: [&dyn Decompressor; 3] = [&self.gzip, &self.deflate, &self.brotli];
        decoders
            .into_iter()
            .find(|d| d.encoding().eq_ignore_ascii_case(encoding.trim()))
    }

    /// Unknown or absent encodings pass the data through unchanged.
    pub fn decompress(&self, data: &[u8], encoding: Option<&str>) -> Result<Vec<u8>, RequestError> {
        match encoding.and_then(|e| self.for_encoding(e)) {
            Some(decoder) if !data.is_empty() => decoder.decompress(data),
            _ => Ok(data.to_vec()),
        }
    }
}

pub fn decompress_body(body: &[u8], encoding: Option<&str>) -> Result<Vec<u8>, RequestError> {
    MultiDecompressor::new().decompress(body, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_gzip_decompression() {
        let original = b"Hello, World!";
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decompress_body(&compressed, Some("gzip")).unwrap(), original);
        assert_eq!(decompress_body(&compressed, Some(" GZIP ")).unwrap(), original);
    }

    #[test]
    fn test_deflate_decompression() {
        let original = b"Hello, World!";
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(DeflateDecompressor.decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_brotli_decompression() {
        let original = b"Hello, brotli!";
        let mut compressed = Vec::new();
        {
            let mut writer = brotli::CompressorWriter::new(&mut compressed, 4096, 5, 22);
            writer.write_all(original).unwrap();
        }

        assert_eq!(decompress_body(&compressed, Some("br")).unwrap(), original);
    }

    #[test]
    fn test_corrupt_gzip_is_an_error() {
        let err = decompress_body(b"definitely not gzip", Some("gzip")).unwrap_err();
        assert_eq!(err.code(), "DECOMPRESSION_ERROR");
    }

    #[test]
    fn test_passthrough() {
        let data = b"Hello, World!";
        assert_eq!(decompress_body(data, None).unwrap(), data);
        assert_eq!(decompress_body(data, Some("identity")).unwrap(), data);
        assert!(decompress_body(b"", Some("gzip")).unwrap().is_empty());
    }
}
