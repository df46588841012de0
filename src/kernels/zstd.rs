//! This module contains the Zstandard implementation of the black-box byte-stream
//! codec that the delta stream is persisted through.
//!
//! This is the Final Stage of the pipeline: frames are written into one streaming
//! encoder in temporal order, and the whole stream is later decoded back into a
//! single flat buffer. This module is a safe, panic-free wrapper around the `zstd`
//! crate.

use std::io::Write;
use zstd::stream::{read::Decoder, write::Encoder};

use crate::error::YuvDeltaError;
use crate::traits::{ByteStreamCodec, CompressedStream};

fn zstd_err(e: std::io::Error) -> YuvDeltaError {
    YuvDeltaError::Zstd(e.to_string())
}

//==================================================================================
// 1. Codec
//==================================================================================

/// A Zstandard codec at a fixed compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self::new(zstd::DEFAULT_COMPRESSION_LEVEL)
    }
}

impl ByteStreamCodec for ZstdCodec {
    type Stream = ZstdStream;

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn open_stream(&self) -> Result<ZstdStream, YuvDeltaError> {
        // The streaming Encoder writes straight into its owned output buffer.
        let encoder = Encoder::new(Vec::new(), self.level).map_err(zstd_err)?;
        Ok(ZstdStream {
            encoder,
            bytes_in: 0,
        })
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, YuvDeltaError> {
        let mut decoder = Decoder::new(compressed).map_err(zstd_err)?;
        // The output grows as needed; streamed frames carry no content-size header.
        let mut out = Vec::new();
        std::io::copy(&mut decoder, &mut out).map_err(zstd_err)?;
        Ok(out)
    }
}

//==================================================================================
// 2. Stream
//==================================================================================

/// An open Zstandard compression stream.
pub struct ZstdStream {
    encoder: Encoder<'static, Vec<u8>>,
    bytes_in: usize,
}

impl CompressedStream for ZstdStream {
    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), YuvDeltaError> {
        self.encoder.write_all(bytes).map_err(zstd_err)?;
        self.bytes_in += bytes.len();
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, YuvDeltaError> {
        self.encoder.flush().map_err(zstd_err)?;
        // `finish` is essential to finalize the Zstd frame.
        let compressed = self.encoder.finish().map_err(zstd_err)?;
        log::debug!(
            "zstd stream finished: {} bytes in, {} bytes out",
            self.bytes_in,
            compressed.len()
        );
        Ok(compressed)
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn compress_frames(codec: &ZstdCodec, frames: &[&[u8]]) -> Vec<u8> {
        let mut stream = codec.open_stream().unwrap();
        for frame in frames {
            stream.write_frame(frame).unwrap();
        }
        stream.finish().unwrap()
    }

    #[test]
    fn test_zstd_roundtrip_multiple_writes() {
        let codec = ZstdCodec::new(3);
        let a = b"hello world, this is a test of zstd compression. ".to_vec();
        let b = b"hello world, this is a test.".to_vec();
        let compressed = compress_frames(&codec, &[a.as_slice(), b.as_slice()]);

        let decompressed = codec.decompress(&compressed).unwrap();
        let mut expected = a.clone();
        expected.extend_from_slice(&b);
        assert_eq!(decompressed, expected);
    }

    #[test]
    fn test_zstd_roundtrip_highly_compressible_data() {
        let codec = ZstdCodec::new(19);
        let original = vec![0u8; 10_000];
        let compressed = compress_frames(&codec, &[original.as_slice()]);
        assert!(compressed.len() < 50);
        assert_eq!(codec.decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_zstd_stream_counts_input() {
        let codec = ZstdCodec::default();
        let mut stream = codec.open_stream().unwrap();
        stream.write_frame(&[1, 2, 3]).unwrap();
        stream.write_frame(&[4, 5]).unwrap();
        assert_eq!(stream.bytes_in, 5);
    }

    #[test]
    fn test_zstd_decompress_invalid_data() {
        let codec = ZstdCodec::default();
        let result = codec.decompress(&[1, 2, 3, 4, 5]);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Zstd"));
        }
    }
}
