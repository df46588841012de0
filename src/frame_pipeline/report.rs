// In: src/frame_pipeline/report.rs

//! Size statistics gathered at the four pipeline checkpoints.
//!
//! The RLE figure is a side computation: it reads the same delta sequence the
//! compressor reads, but nothing it produces is persisted or fed back into the
//! reconstruction path.

use serde::Serialize;
use std::fmt;

use crate::kernels::rle;
use crate::traits::FrameBuffer;
use crate::types::{DeltaFrame, FrameSequence};

/// The four points at which the pipeline reports a size.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    Raw,
    Yuv420p,
    Rle,
    Compressed,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Checkpoint::Raw => "Raw",
            Checkpoint::Yuv420p => "YUV420P",
            Checkpoint::Rle => "RLE",
            Checkpoint::Compressed => "Compressed",
        };
        f.write_str(label)
    }
}

/// Byte counts for one run, relative to the raw RGB24 input.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SizeReport {
    pub frame_count: usize,
    pub raw_bytes: usize,
    pub yuv_bytes: usize,
    /// `None` when RLE statistics were disabled in the config.
    pub rle_bytes: Option<usize>,
    pub compressed_bytes: usize,
    /// Name of the codec that produced `compressed_bytes`.
    pub codec: String,
}

impl SizeReport {
    /// `bytes` as a percentage of the raw input size. An empty input reports 0%.
    pub fn percent_of_raw(&self, bytes: usize) -> f32 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        100.0 * bytes as f32 / self.raw_bytes as f32
    }

    /// Every recorded checkpoint in pipeline order.
    pub fn checkpoints(&self) -> Vec<(Checkpoint, usize)> {
        let mut out = vec![
            (Checkpoint::Raw, self.raw_bytes),
            (Checkpoint::Yuv420p, self.yuv_bytes),
        ];
        if let Some(rle_bytes) = self.rle_bytes {
            out.push((Checkpoint::Rle, rle_bytes));
        }
        out.push((Checkpoint::Compressed, self.compressed_bytes));
        out
    }

    /// Emits one `log::info!` line for a checkpoint.
    pub fn log_checkpoint(&self, checkpoint: Checkpoint, bytes: usize) {
        match checkpoint {
            Checkpoint::Raw => log::info!("{} size: {} bytes", checkpoint, bytes),
            Checkpoint::Compressed => log::info!(
                "{} ({}) size: {} bytes ({:.2}% original size)",
                checkpoint,
                self.codec,
                bytes,
                self.percent_of_raw(bytes)
            ),
            _ => log::info!(
                "{} size: {} bytes ({:.2}% original size)",
                checkpoint,
                bytes,
                self.percent_of_raw(bytes)
            ),
        }
    }
}

/// The RLE size of a delta sequence.
///
/// The anchor frame is a key frame, not a difference, so it is counted at its
/// verbatim size. Every later delta frame is counted at its run-length encoded size.
pub fn rle_statistic(deltas: &FrameSequence<DeltaFrame>) -> usize {
    deltas
        .iter()
        .enumerate()
        .map(|(i, delta)| match i {
            0 => delta.byte_len(),
            _ => rle::encode(delta.as_bytes()).encoded_len(),
        })
        .sum()
}
