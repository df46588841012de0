//! This file is the root of the `yuvdelta` Rust crate.
//!
//! Its responsibilities are strictly limited to declaring the top-level modules of
//! the library and re-exporting the handful of types most callers need. The
//! `yuvdelta` binary in `src/main.rs` is a thin wrapper over `bridge`.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod frame_pipeline;
pub mod kernels;
pub mod traits;
pub mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::{CompressionProfile, TranscodeConfig};
pub use error::YuvDeltaError;
pub use frame_pipeline::{PipelineOutput, SizeReport, TranscodePipeline};
pub use types::{DeltaFrame, FrameSequence, RawFrame, Resolution, Rgb24, YuvFrame};
