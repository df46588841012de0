//! This module contains the pure, stateless kernels for converting between
//! interleaved RGB24 and planar YUV420P.
//!
//! Encoding computes full-resolution Y, U and V per pixel, then box-filters each
//! non-overlapping 2x2 block of U and V down to a single sample. Decoding is the
//! nearest-block inverse: every pixel in a 2x2 block reuses that block's chroma.
//!
//! The round trip is lossy. Chroma subsampling throws information away, and encode
//! truncates without clamping while decode clamps before truncating.

use crate::error::YuvDeltaError;
use crate::traits::FrameBuffer;
use crate::types::{FrameSequence, RawFrame, Resolution, Rgb24, YuvFrame};

/// Offset that centres the chroma channels on the unsigned byte range.
const CHROMA_BIAS: f64 = 128.0;

//==================================================================================
// 1. Per-Sample Math
//==================================================================================

/// Forward transform for one pixel. Chroma is left unrounded so the 2x2 average
/// is taken over full-precision values.
#[inline(always)]
fn rgb_to_yuv(px: Rgb24) -> (f64, f64, f64) {
    let r = px.r as f64;
    let g = px.g as f64;
    let b = px.b as f64;

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.169 * r - 0.331 * g + 0.449 * b + CHROMA_BIAS;
    let v = 0.499 * r - 0.418 * g - 0.0813 * b + CHROMA_BIAS;
    (y, u, v)
}

/// Inverse transform for one pixel. `u` and `v` have already had the bias removed.
#[inline(always)]
fn yuv_to_rgb(y: f64, u: f64, v: f64) -> Rgb24 {
    let r = (y + 1.402 * v).clamp(0.0, 255.0);
    let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0);
    let b = (y + 1.772 * u).clamp(0.0, 255.0);
    Rgb24::new(r as u8, g as u8, b as u8)
}

/// Truncates toward zero, so the V=255.245 produced by pure red lands on 255.
#[inline(always)]
fn truncate(value: f64) -> u8 {
    value as u8
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Converts one RGB24 frame into a YUV420P frame.
pub fn encode(rgb: &RawFrame, res: Resolution) -> Result<YuvFrame, YuvDeltaError> {
    res.validate()?;
    if rgb.byte_len() != res.rgb_frame_len() {
        return Err(YuvDeltaError::BufferMismatch {
            expected: res.rgb_frame_len(),
            actual: rgb.byte_len(),
        });
    }
    let pixels = rgb.pixels()?;
    let width = res.width;
    let luma_len = res.luma_len();
    let chroma_len = res.chroma_len();

    let mut out = vec![0u8; res.yuv_frame_len()];
    let mut u_full = Vec::with_capacity(luma_len);
    let mut v_full = Vec::with_capacity(luma_len);

    for (y_out, &px) in out[..luma_len].iter_mut().zip(pixels) {
        let (y, u, v) = rgb_to_yuv(px);
        *y_out = truncate(y);
        u_full.push(u);
        v_full.push(v);
    }

    let (u_plane, v_plane) = out[luma_len..].split_at_mut(chroma_len);
    let chroma_width = res.chroma_width();
    for row in (0..res.height).step_by(2) {
        for col in (0..width).step_by(2) {
            let top = row * width + col;
            let bottom = top + width;
            let block = [top, top + 1, bottom, bottom + 1];

            let u: f64 = block.iter().map(|&i| u_full[i]).sum::<f64>() / 4.0;
            let v: f64 = block.iter().map(|&i| v_full[i]).sum::<f64>() / 4.0;

            let idx = (row / 2) * chroma_width + col / 2;
            u_plane[idx] = truncate(u);
            v_plane[idx] = truncate(v);
        }
    }

    Ok(YuvFrame::from_bytes(out))
}

/// Converts one YUV420P frame back into an RGB24 frame.
pub fn decode(yuv: &YuvFrame, res: Resolution) -> Result<RawFrame, YuvDeltaError> {
    res.validate()?;
    let (y_plane, u_plane, v_plane) = yuv.planes(res)?;
    let chroma_width = res.chroma_width();

    let mut pixels = Vec::with_capacity(res.luma_len());
    for row in 0..res.height {
        let y_row = &y_plane[row * res.width..][..res.width];
        let chroma_row = (row / 2) * chroma_width;
        for (col, &y) in y_row.iter().enumerate() {
            let c = chroma_row + col / 2;
            let u = u_plane[c] as f64 - CHROMA_BIAS;
            let v = v_plane[c] as f64 - CHROMA_BIAS;
            pixels.push(yuv_to_rgb(y as f64, u, v));
        }
    }

    Ok(RawFrame::from_bytes(
        bytemuck::cast_slice::<Rgb24, u8>(&pixels).to_vec(),
    ))
}

/// Stage helper: converts a whole RGB sequence, allocating a new YUV sequence.
pub fn encode_sequence(
    frames: &FrameSequence<RawFrame>,
    res: Resolution,
) -> Result<FrameSequence<YuvFrame>, YuvDeltaError> {
    let mut out = FrameSequence::with_capacity(frames.len());
    for frame in frames {
        out.push(encode(frame, res)?)?;
    }
    Ok(out)
}

/// Stage helper: converts a whole YUV sequence, allocating a new RGB sequence.
pub fn decode_sequence(
    frames: &FrameSequence<YuvFrame>,
    res: Resolution,
) -> Result<FrameSequence<RawFrame>, YuvDeltaError> {
    let mut out = FrameSequence::with_capacity(frames.len());
    for frame in frames {
        out.push(decode(frame, res)?)?;
    }
    Ok(out)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
