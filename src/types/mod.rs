//! This module defines the core, strongly-typed data representations used
//! throughout the yuvdelta pipeline.
//!
//! It includes the `Resolution` that fixes every frame length, the three frame
//! kinds (`RawFrame`, `YuvFrame`, `DeltaFrame`), and the ordered `FrameSequence`
//! container that each pipeline stage consumes and produces.

pub mod frame;
pub mod resolution;
pub mod sequence;

// Re-export the main type(s) for easier access.
pub use frame::{DeltaFrame, RawFrame, Rgb24, YuvFrame};
pub use resolution::Resolution;
pub use sequence::FrameSequence;
