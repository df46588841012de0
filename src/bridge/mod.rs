// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the boundary between byte streams in the outside world (stdin,
// files) and the pure, in-memory `frame_pipeline` engine. The engine never touches
// a reader or a writer; the bridge never does any pixel math.
//
// Data Flow:
//
//   1. [reader::FrameReader]       -> Receives `impl Read`
//         |
//         `-> yields `ReadOutcome::Frame` until `ReadOutcome::EndOfStream`
//
//   2. [stateless_api::transcode_*] -> collects a `FrameSequence<RawFrame>`
//         |
//         `-> calls `frame_pipeline::TranscodePipeline::run`
//
//   3. [writer::write_artifacts]    -> streams each output sequence to its file
//
// ====================================================================================
pub mod reader;
pub mod stateless_api;
pub mod writer;

pub use reader::{read_frames, FrameReader, IngestSummary, ReadOutcome};
pub use stateless_api::{transcode_bytes, transcode_reader};
pub use writer::{write_artifacts, write_sequence, write_sequence_to_file};

#[cfg(test)]
mod tests;
