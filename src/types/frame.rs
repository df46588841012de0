//! The three frame kinds that flow through the pipeline.
//!
//! All of them are plain owned byte buffers. Keeping them as distinct newtypes
//! stops a delta frame from being handed to the color converter by mistake, while
//! `FrameBuffer` lets the generic kernels treat them uniformly.

use bytemuck::{Pod, Zeroable};

use crate::error::YuvDeltaError;
use crate::traits::FrameBuffer;
use crate::types::Resolution;

//==================================================================================
// 1. Pixel Layout
//==================================================================================

/// One interleaved RGB24 pixel, laid out exactly as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Rgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb24 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

//==================================================================================
// 2. Frame Newtypes
//==================================================================================

macro_rules! impl_frame_buffer {
    ($name:ident, $kind:literal) => {
        impl FrameBuffer for $name {
            const KIND: &'static str = $kind;

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            fn into_bytes(self) -> Vec<u8> {
                self.0
            }

            fn from_bytes(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }
    };
}

/// An interleaved, row-major RGB24 frame of `width * height * 3` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame(Vec<u8>);

/// A planar YUV420P frame: the full-resolution Y plane followed by the
/// quarter-resolution U and V planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YuvFrame(Vec<u8>);

/// The byte-wise modulo-256 difference between a frame and its predecessor.
/// The first delta frame of a sequence carries its source frame verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaFrame(Vec<u8>);

impl_frame_buffer!(RawFrame, "rgb24");
impl_frame_buffer!(YuvFrame, "yuv420p");
impl_frame_buffer!(DeltaFrame, "delta");

/// Returns a `BufferMismatch` unless `actual == expected`.
fn check_len(expected: usize, actual: usize) -> Result<(), YuvDeltaError> {
    if expected != actual {
        return Err(YuvDeltaError::BufferMismatch { expected, actual });
    }
    Ok(())
}

impl RawFrame {
    /// Wraps `bytes` after checking it holds exactly one RGB24 frame at `res`.
    pub fn new(bytes: Vec<u8>, res: Resolution) -> Result<Self, YuvDeltaError> {
        check_len(res.rgb_frame_len(), bytes.len())?;
        Ok(Self(bytes))
    }

    /// Builds a frame where every pixel is `pixel`. Mostly useful for tests and
    /// benchmarks.
    pub fn solid(res: Resolution, pixel: Rgb24) -> Self {
        let pixels = vec![pixel; res.luma_len()];
        Self(bytemuck::cast_slice(&pixels).to_vec())
    }

    /// A zero-copy view of the frame as pixels.
    pub fn pixels(&self) -> Result<&[Rgb24], YuvDeltaError> {
        Ok(bytemuck::try_cast_slice(&self.0)?)
    }
}

impl YuvFrame {
    /// Wraps `bytes` after checking it holds exactly one YUV420P frame at `res`.
    pub fn new(bytes: Vec<u8>, res: Resolution) -> Result<Self, YuvDeltaError> {
        check_len(res.yuv_frame_len(), bytes.len())?;
        Ok(Self(bytes))
    }

    /// Splits the buffer into its Y, U and V planes.
    pub fn planes(&self, res: Resolution) -> Result<(&[u8], &[u8], &[u8]), YuvDeltaError> {
        check_len(res.yuv_frame_len(), self.0.len())?;
        let (y, chroma) = self.0.split_at(res.luma_len());
        let (u, v) = chroma.split_at(res.chroma_len());
        Ok((y, u, v))
    }

    pub fn y_plane(&self, res: Resolution) -> Result<&[u8], YuvDeltaError> {
        Ok(self.planes(res)?.0)
    }

    pub fn u_plane(&self, res: Resolution) -> Result<&[u8], YuvDeltaError> {
        Ok(self.planes(res)?.1)
    }

    pub fn v_plane(&self, res: Resolution) -> Result<&[u8], YuvDeltaError> {
        Ok(self.planes(res)?.2)
    }
}

impl DeltaFrame {
    /// True when the frame carries no change at all, i.e. every byte is zero.
    pub fn is_static(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_frame_rejects_wrong_length() {
        let res = Resolution::new(2, 2);
        let result = RawFrame::new(vec![0; 11], res);
        assert!(matches!(
            result,
            Err(YuvDeltaError::BufferMismatch {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_solid_frame_pixels() {
        let res = Resolution::new(2, 2);
        let frame = RawFrame::solid(res, Rgb24::new(255, 0, 0));
        assert_eq!(frame.as_bytes(), &[255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0]);
        let pixels = frame.pixels().unwrap();
        assert_eq!(pixels.len(), 4);
        assert!(pixels.iter().all(|&p| p == Rgb24::new(255, 0, 0)));
    }

    #[test]
    fn test_yuv_planes_split() {
        let res = Resolution::new(2, 2);
        let frame = YuvFrame::new(vec![1, 2, 3, 4, 5, 6], res).unwrap();
        let (y, u, v) = frame.planes(res).unwrap();
        assert_eq!(y, &[1, 2, 3, 4]);
        assert_eq!(u, &[5]);
        assert_eq!(v, &[6]);
    }

    #[test]
    fn test_delta_is_static() {
        assert!(DeltaFrame::from_bytes(vec![0; 6]).is_static());
        assert!(!DeltaFrame::from_bytes(vec![0, 0, 1]).is_static());
    }
}
