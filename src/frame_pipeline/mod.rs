//! This module defines the top-level transcoding pipeline. It sequences the pure
//! kernels (color conversion, delta coding, RLE statistics, stream compression)
//! over a whole frame set and gathers the size report.
//!
//! Data flow:
//!
//!   RawFrame seq -> colorspace::encode -> YuvFrame seq -> delta::diff
//!       -> (a) report::rle_statistic          [statistic only]
//!       -> (b) codec stream -> compressed bytes
//!   compressed bytes -> codec decompress -> split -> delta::integrate
//!       -> YuvFrame seq -> colorspace::decode -> RawFrame seq

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod orchestrator;
pub mod report;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use self::orchestrator::{PipelineOutput, TranscodePipeline};
pub use self::report::{Checkpoint, SizeReport};
