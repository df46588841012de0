// In: src/bridge/writer.rs

//! Artifact output. Every artifact is a plain concatenation of frame buffers with
//! no header, so a sequence can be streamed to any `io::Write` frame by frame.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::ArtifactPaths;
use crate::error::YuvDeltaError;
use crate::frame_pipeline::PipelineOutput;
use crate::traits::FrameBuffer;
use crate::types::FrameSequence;

/// Writes every frame in order and returns the number of bytes written.
pub fn write_sequence<W: Write, F: FrameBuffer>(
    writer: &mut W,
    frames: &FrameSequence<F>,
) -> Result<usize, YuvDeltaError> {
    let mut written = 0;
    for frame in frames {
        writer.write_all(frame.as_bytes())?;
        written += frame.byte_len();
    }
    writer.flush()?;
    Ok(written)
}

/// Creates (or truncates) `path` and writes the sequence into it.
pub fn write_sequence_to_file<F: FrameBuffer>(
    path: &Path,
    frames: &FrameSequence<F>,
) -> Result<usize, YuvDeltaError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_sequence(&mut writer, frames)?;
    log::debug!("Wrote {} bytes of {} to {}", written, F::KIND, path.display());
    Ok(written)
}

/// Writes the three output artifacts of a run into `dir`.
pub fn write_artifacts(
    dir: &Path,
    paths: &ArtifactPaths,
    output: &PipelineOutput,
) -> Result<(), YuvDeltaError> {
    write_sequence_to_file(&dir.join(&paths.encoded_yuv), &output.yuv_frames)?;
    write_sequence_to_file(&dir.join(&paths.decoded_yuv), &output.roundtrip_yuv_frames)?;
    write_sequence_to_file(&dir.join(&paths.decoded_rgb), &output.reconstructed_frames)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeltaFrame;
    use std::io;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn two_frames() -> FrameSequence<DeltaFrame> {
        FrameSequence::from_frames(vec![
            DeltaFrame::from_bytes(vec![1, 2, 3]),
            DeltaFrame::from_bytes(vec![4, 5, 6]),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_sequence_concatenates() {
        let mut out = Vec::new();
        let written = write_sequence(&mut out, &two_frames()).unwrap();
        assert_eq!(written, 6);
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let result = write_sequence(&mut FailingWriter, &two_frames());
        assert!(matches!(result, Err(YuvDeltaError::Io(_))));
    }

    #[test]
    fn test_write_sequence_to_file() {
        let path = std::env::temp_dir().join(format!("yuvdelta-writer-{}.bin", std::process::id()));
        let written = write_sequence_to_file(&path, &two_frames()).unwrap();
        assert_eq!(written, 6);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4, 5, 6]);
        std::fs::remove_file(&path).unwrap();
    }
}
