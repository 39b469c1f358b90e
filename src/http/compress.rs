//! Response body compression.
//!
//! Only gzip is produced. The compressor rewrites a finished `Response`, so it
//! runs after routing and before serialization; `Content-Length` is computed at
//! serialization time and therefore always reflects the compressed size.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CompressionConfig;
use crate::http::request::{Encoding, EncodingSet};
use crate::http::response::Response;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("gzip encoder failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("compressed body is {actual} bytes, limit is {limit}")]
    OutputTooLarge { limit: usize, actual: usize },
}

#[derive(Debug, Clone)]
pub struct GzipCompressor {
    enabled: bool,
    level: Compression,
    max_output_bytes: Option<usize>,
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new(Compression::default().level(), None)
    }
}

impl GzipCompressor {
    /// `level` follows zlib (0-9); values above 9 are clamped.
    pub fn new(level: u32, max_output_bytes: Option<usize>) -> Self {
        Self {
            enabled: true,
            level: Compression::new(level.min(9)),
            max_output_bytes,
        }
    }

    pub fn from_config(cfg: &CompressionConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            ..Self::new(cfg.level, cfg.max_output_bytes)
        }
    }

    /// Wraps `data` in an RFC 1952 gzip member.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), self.level);
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;

        if let Some(limit) = self.max_output_bytes {
            if compressed.len() > limit {
                return Err(CompressionError::OutputTooLarge {
                    limit,
                    actual: compressed.len(),
                });
            }
        }

        Ok(compressed)
    }

    /// Compresses the response body when the client accepts gzip.
    ///
    /// Body-less responses pass through untouched. On failure the original
    /// response is returned as-is, without a `Content-Encoding` header.
    pub fn apply(&self, mut response: Response, encodings: EncodingSet) -> Response {
        if !self.enabled || !encodings.contains(Encoding::Gzip) {
            return response;
        }

        let Some(body) = response.body.as_deref() else {
            return response;
        };

        match self.compress(body) {
            Ok(compressed) => {
                debug!(
                    before = body.len(),
                    after = compressed.len(),
                    "compressed response body"
                );
                response.body = Some(compressed);
                response
                    .extra_headers
                    .push(format!("Content-Encoding: {}", Encoding::Gzip.name()));
                response
            }
            Err(e) => {
                warn!(error = %e, "compression failed, sending identity body");
                response
            }
        }
    }
}
