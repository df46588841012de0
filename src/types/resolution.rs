//! The frame geometry shared by every buffer in a run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::YuvDeltaError;

/// Default frame width, matching a portrait 1080p capture.
pub const DEFAULT_WIDTH: usize = 1080;
/// Default frame height, matching a portrait 1080p capture.
pub const DEFAULT_HEIGHT: usize = 1920;

/// Width and height of every frame in a sequence, in pixels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Checks that the resolution can be 2x2-subsampled and that every derived
    /// buffer length fits in a `usize`.
    pub fn validate(&self) -> Result<(), YuvDeltaError> {
        let invalid = |reason: &str| YuvDeltaError::InvalidResolution {
            width: self.width,
            height: self.height,
            reason: reason.to_string(),
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid("dimensions must be non-zero"));
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(invalid("dimensions must be even for 4:2:0 subsampling"));
        }
        self.width
            .checked_mul(self.height)
            .and_then(|px| px.checked_mul(3))
            .ok_or_else(|| invalid("frame size overflows usize"))?;
        Ok(())
    }

    /// Number of pixels, which is also the length of the Y plane.
    pub fn luma_len(&self) -> usize {
        self.width * self.height
    }

    /// Length of one quarter-resolution chroma plane (U or V).
    pub fn chroma_len(&self) -> usize {
        self.luma_len() / 4
    }

    /// Width of a chroma plane in samples.
    pub fn chroma_width(&self) -> usize {
        self.width / 2
    }

    /// Length of one interleaved RGB24 frame.
    pub fn rgb_frame_len(&self) -> usize {
        self.luma_len() * 3
    }

    /// Length of one planar YUV420P frame.
    pub fn yuv_frame_len(&self) -> usize {
        self.luma_len() * 3 / 2
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_lengths_for_2x2() {
        let res = Resolution::new(2, 2);
        assert_eq!(res.luma_len(), 4);
        assert_eq!(res.chroma_len(), 1);
        assert_eq!(res.rgb_frame_len(), 12);
        assert_eq!(res.yuv_frame_len(), 6);
    }

    #[test]
    fn test_default_is_portrait_1080p() {
        let res = Resolution::default();
        assert_eq!((res.width, res.height), (1080, 1920));
        assert_eq!(res.yuv_frame_len(), 1080 * 1920 * 3 / 2);
        assert!(res.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_odd_and_zero() {
        assert!(matches!(
            Resolution::new(3, 2).validate(),
            Err(YuvDeltaError::InvalidResolution { width: 3, .. })
        ));
        assert!(Resolution::new(4, 5).validate().is_err());
        assert!(Resolution::new(0, 2).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflow() {
        let res = Resolution::new(usize::MAX - 1, 2);
        assert!(res.validate().is_err());
    }
}
