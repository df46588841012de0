// In: src/error.rs

//! This module defines the single, unified error type for the entire yuvdelta library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum YuvDeltaError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// Width and height must both be non-zero and even for 2x2 chroma subsampling.
    #[error("Invalid resolution {width}x{height}: {reason}")]
    InvalidResolution {
        width: usize,
        height: usize,
        reason: String,
    },

    #[error("Frame serialization/deserialization failed: {0}")]
    FrameFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., a closed pipe).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config or
    /// emitting a size report.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error

    // =========================================================================
    // === Low-Level Kernel Errors
    // =========================================================================
    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    #[error("Frame {index} has {actual} bytes but the sequence holds {expected}-byte frames")]
    SequenceLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Zstd operation failed: {0}")]
    Zstd(String),

    #[error("RLE decoding error: {0}")]
    RleDecode(String),

    #[error("Pipeline execution failed at stage '{stage}': {source}")]
    PipelineError {
        stage: String,
        #[source]
        source: Box<YuvDeltaError>,
    },
}

impl YuvDeltaError {
    /// Wraps an error with the name of the pipeline stage that produced it.
    pub fn at_stage(stage: &str, source: YuvDeltaError) -> Self {
        YuvDeltaError::PipelineError {
            stage: stage.to_string(),
            source: Box::new(source),
        }
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for YuvDeltaError {
    fn from(err: bytemuck::PodCastError) -> Self {
        YuvDeltaError::PodCast(err.to_string())
    }
}
