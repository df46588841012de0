// In: src/frame_pipeline/orchestrator.rs

use std::sync::Arc;
use std::time::Instant;

use crate::config::TranscodeConfig;
use crate::error::YuvDeltaError;
use crate::frame_pipeline::report::{self, Checkpoint, SizeReport};
use crate::kernels::{colorspace, delta, ZstdCodec};
use crate::traits::{ByteStreamCodec, CompressedStream, FrameBuffer};
use crate::types::{DeltaFrame, FrameSequence, RawFrame, Resolution, YuvFrame};

/// Every artifact a run produces. Each stage wrote into its own sequence, so
/// nothing here aliases anything else.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// YUV420P frames straight out of color conversion.
    pub yuv_frames: FrameSequence<YuvFrame>,
    /// YUV420P frames after delta, compression, decompression and integration.
    pub roundtrip_yuv_frames: FrameSequence<YuvFrame>,
    /// The final RGB24 frames.
    pub reconstructed_frames: FrameSequence<RawFrame>,
    /// The compressed delta stream.
    pub compressed: Vec<u8>,
    pub report: SizeReport,
}

/// Sequences the color, delta and compression stages over a whole frame set.
///
/// The pipeline holds every frame in memory at every stage and runs strictly
/// sequentially. Any stage failure aborts the run.
pub struct TranscodePipeline<C: ByteStreamCodec = ZstdCodec> {
    config: Arc<TranscodeConfig>,
    codec: C,
}

impl TranscodePipeline<ZstdCodec> {
    /// A pipeline using Zstd at the level chosen by the config's profile.
    pub fn new(config: Arc<TranscodeConfig>) -> Result<Self, YuvDeltaError> {
        let codec = ZstdCodec::new(config.profile.zstd_level());
        Self::with_codec(config, codec)
    }
}

impl<C: ByteStreamCodec> TranscodePipeline<C> {
    /// A pipeline over an arbitrary stream codec. Fails on an invalid config.
    pub fn with_codec(config: Arc<TranscodeConfig>, codec: C) -> Result<Self, YuvDeltaError> {
        config.validate()?;
        Ok(Self { config, codec })
    }

    pub fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution
    }

    //==================================================================================
    // Full Run
    //==================================================================================

    /// Runs every stage over `frames`, taking ownership of the raw input.
    pub fn run(&self, frames: FrameSequence<RawFrame>) -> Result<PipelineOutput, YuvDeltaError> {
        let res = self.resolution();
        let start = Instant::now();
        let mut report = SizeReport {
            frame_count: frames.len(),
            raw_bytes: frames.total_bytes(),
            codec: self.codec.name().to_string(),
            ..SizeReport::default()
        };
        report.log_checkpoint(Checkpoint::Raw, report.raw_bytes);

        // 1. RGB24 -> YUV420P. The raw frames are dropped once converted.
        let yuv_frames = colorspace::encode_sequence(&frames, res)
            .map_err(|e| YuvDeltaError::at_stage("color_encode", e))?;
        drop(frames);
        report.yuv_bytes = yuv_frames.total_bytes();
        report.log_checkpoint(Checkpoint::Yuv420p, report.yuv_bytes);
        log_metric!("event"="stage_done", "stage"="color_encode", "frames"=yuv_frames.len());

        // 2. Forward delta. Two independent consumers read the result: the RLE
        //    statistic and the compressor.
        let deltas =
            delta::diff(&yuv_frames).map_err(|e| YuvDeltaError::at_stage("delta_diff", e))?;
        let static_frames = deltas.iter().skip(1).filter(|d| d.is_static()).count();
        log::debug!(
            "{} of {} delta frames are static",
            static_frames,
            deltas.len().saturating_sub(1)
        );
        if self.config.collect_rle_stats {
            let rle_bytes = report::rle_statistic(&deltas);
            report.rle_bytes = Some(rle_bytes);
            report.log_checkpoint(Checkpoint::Rle, rle_bytes);
        }

        // 3. Compress frame 0 verbatim plus every later delta, in order.
        let compressed = self
            .compress_deltas(&deltas)
            .map_err(|e| YuvDeltaError::at_stage("compress", e))?;
        drop(deltas);
        report.compressed_bytes = compressed.len();
        report.log_checkpoint(Checkpoint::Compressed, report.compressed_bytes);

        // 4. Decompress, split, integrate.
        let roundtrip_yuv_frames = self.reconstruct(&compressed)?;

        // 5. YUV420P -> RGB24.
        let reconstructed_frames = colorspace::decode_sequence(&roundtrip_yuv_frames, res)
            .map_err(|e| YuvDeltaError::at_stage("color_decode", e))?;

        log::debug!(
            "Transcoded {} frames at {} in {:.2?}",
            report.frame_count,
            res,
            start.elapsed()
        );
        for (checkpoint, bytes) in report.checkpoints() {
            log::debug!(
                "  {:<10} {:>12} bytes ({:.2}%)",
                checkpoint.to_string(),
                bytes,
                report.percent_of_raw(bytes)
            );
        }

        Ok(PipelineOutput {
            yuv_frames,
            roundtrip_yuv_frames,
            reconstructed_frames,
            compressed,
            report,
        })
    }

    //==================================================================================
    // Individual Stages
    //==================================================================================

    /// Streams every delta frame through one compression stream and finalizes it.
    pub fn compress_deltas(
        &self,
        deltas: &FrameSequence<DeltaFrame>,
    ) -> Result<Vec<u8>, YuvDeltaError> {
        let start = Instant::now();
        let mut stream = self.codec.open_stream()?;
        for frame in deltas {
            stream.write_frame(frame.as_bytes())?;
        }
        let compressed = stream.finish()?;
        log::debug!(
            "Compressed {} delta frames with {} in {:.2?}",
            deltas.len(),
            self.codec.name(),
            start.elapsed()
        );
        log_metric!(
            "event"="stage_done",
            "stage"="compress",
            "codec"=self.codec.name(),
            "bytes_out"=compressed.len()
        );
        Ok(compressed)
    }

    /// Decompresses the stream, splits it into YUV-frame-sized delta segments, and
    /// folds them back into YUV frames.
    pub fn reconstruct(&self, compressed: &[u8]) -> Result<FrameSequence<YuvFrame>, YuvDeltaError> {
        let flat = self
            .codec
            .decompress(compressed)
            .map_err(|e| YuvDeltaError::at_stage("decompress", e))?;
        let frame_len = self.resolution().yuv_frame_len();
        let deltas = FrameSequence::<DeltaFrame>::split_exact(&flat, frame_len)
            .map_err(|e| YuvDeltaError::at_stage("split", e))?;
        log::debug!(
            "Decompressed {} bytes into {} delta frames",
            flat.len(),
            deltas.len()
        );
        delta::integrate(deltas).map_err(|e| YuvDeltaError::at_stage("delta_integrate", e))
    }
}
