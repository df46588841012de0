use super::*;
use crate::config::TranscodeConfig;
use crate::types::Resolution;
use std::path::PathBuf;
use std::sync::Arc;

fn small_config() -> Arc<TranscodeConfig> {
    Arc::new(TranscodeConfig {
        resolution: Resolution::new(2, 2),
        ..TranscodeConfig::default()
    })
}

fn red_stream(frames: usize) -> Vec<u8> {
    [255u8, 0, 0].repeat(4 * frames)
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("yuvdelta-{}-{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_transcode_bytes_red_scenario() {
    let input = red_stream(2);
    assert_eq!(input.len(), 24);

    let output = transcode_bytes(&input, small_config()).unwrap();
    assert_eq!(output.yuv_frames.total_bytes(), 12);
    assert_eq!(output.roundtrip_yuv_frames.concat(), output.yuv_frames.concat());

    let rgb = output.reconstructed_frames.concat();
    assert_eq!(rgb, [254u8, 0, 0].repeat(8));
}

#[test]
fn test_transcode_reader_drops_partial_frame() {
    let mut input = red_stream(1);
    input.extend_from_slice(&[1, 2, 3, 4, 5]);

    let (output, summary) = transcode_reader(input.as_slice(), small_config()).unwrap();
    assert_eq!(summary.frames, 1);
    assert_eq!(summary.discarded_tail, 5);
    assert_eq!(output.report.raw_bytes, 12);
    assert_eq!(output.reconstructed_frames.len(), 1);
}

#[test]
fn test_transcode_rejects_odd_resolution_before_reading() {
    let config = Arc::new(TranscodeConfig {
        resolution: Resolution::new(2, 3),
        ..TranscodeConfig::default()
    });
    let result = transcode_bytes(&red_stream(1), config);
    assert!(result.is_err());
}

#[test]
fn test_write_artifacts_layout() {
    let dir = scratch_dir("artifacts");
    let config = small_config();
    let output = transcode_bytes(&red_stream(2), Arc::clone(&config)).unwrap();

    write_artifacts(&dir, &config.artifacts, &output).unwrap();

    let encoded = std::fs::read(dir.join("encoded.yuv")).unwrap();
    let decoded = std::fs::read(dir.join("decoded.yuv")).unwrap();
    let rgb = std::fs::read(dir.join("decoded.rgb24")).unwrap();
    assert_eq!(encoded, vec![76, 76, 76, 76, 84, 255, 76, 76, 76, 76, 84, 255]);
    assert_eq!(decoded, encoded);
    assert_eq!(rgb.len(), 24);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_write_artifacts_missing_dir_is_fatal() {
    let dir = std::env::temp_dir()
        .join(format!("yuvdelta-missing-{}", std::process::id()))
        .join("does-not-exist");
    let config = small_config();
    let output = transcode_bytes(&red_stream(1), Arc::clone(&config)).unwrap();
    let result = write_artifacts(&dir, &config.artifacts, &output);
    assert!(matches!(result, Err(crate::error::YuvDeltaError::Io(_))));
}
