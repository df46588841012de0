//! This module defines the shared traits at the seams of the pipeline: the byte
//! view every frame kind exposes, and the black-box stream codec the orchestrator
//! feeds the delta stream through.

use crate::error::YuvDeltaError;

/// A frame that is, at bottom, one contiguous byte buffer.
///
/// Every frame kind in the pipeline (`RawFrame`, `YuvFrame`, `DeltaFrame`) is a thin
/// newtype over `Vec<u8>`. The trait lets the delta kernel and the sequence container
/// stay generic over the kind while the type system still keeps the kinds apart.
pub trait FrameBuffer: Sized {
    /// A short, human-readable name used in log lines and error messages.
    const KIND: &'static str;

    fn as_bytes(&self) -> &[u8];

    fn into_bytes(self) -> Vec<u8>;

    /// Wraps an owned buffer without validating its length against a resolution.
    fn from_bytes(bytes: Vec<u8>) -> Self;

    fn byte_len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// **CONTRACT:** A lossless byte-stream compressor with streaming write semantics.
///
/// The orchestrator only relies on three things: it can open a fresh stream, write
/// any number of frame buffers into it in order, and finish it to obtain the final
/// compressed bytes. Decompression reads the whole stream back into one flat buffer.
pub trait ByteStreamCodec {
    type Stream: CompressedStream;

    /// A short name for log lines, e.g. `"zstd"`.
    fn name(&self) -> &'static str;

    fn open_stream(&self) -> Result<Self::Stream, YuvDeltaError>;

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, YuvDeltaError>;
}

/// An in-progress compression stream returned by `ByteStreamCodec::open_stream`.
pub trait CompressedStream {
    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), YuvDeltaError>;

    /// Flushes and finalizes the stream, returning the complete compressed bytes.
    fn finish(self) -> Result<Vec<u8>, YuvDeltaError>;
}
