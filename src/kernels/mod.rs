//! This module serves as the public API for the pure, stateless kernels that
//! make up the transcoding pipeline. Each kernel owns one byte-level transform
//! and knows nothing about files, configuration, or stage ordering.

pub mod colorspace;
pub mod delta;
pub mod rle;
pub mod zstd;

pub use self::zstd::ZstdCodec;
