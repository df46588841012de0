// In: src/bridge/stateless_api.rs

use std::io::Read;
use std::sync::Arc;

use crate::bridge::reader::{read_frames, IngestSummary};
use crate::config::TranscodeConfig;
use crate::error::YuvDeltaError;
use crate::frame_pipeline::{PipelineOutput, TranscodePipeline};

/// Reads every frame from `reader` and runs the full pipeline over them.
/// This is the entry point the binary uses.
pub fn transcode_reader<R: Read>(
    reader: R,
    config: Arc<TranscodeConfig>,
) -> Result<(PipelineOutput, IngestSummary), YuvDeltaError> {
    // 1. Validate the config before touching the stream.
    let pipeline = TranscodePipeline::new(Arc::clone(&config))?;

    // 2. Ingest. A partial trailing frame ends the stream quietly.
    let (frames, summary) = read_frames(reader, config.resolution)?;

    // 3. Run the pure pipeline engine.
    let output = pipeline.run(frames)?;
    Ok((output, summary))
}

/// Runs the full pipeline over an in-memory RGB24 stream.
pub fn transcode_bytes(
    rgb_stream: &[u8],
    config: Arc<TranscodeConfig>,
) -> Result<PipelineOutput, YuvDeltaError> {
    transcode_reader(rgb_stream, config).map(|(output, _)| output)
}
