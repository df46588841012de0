//! The ordered, temporally significant container of frames owned by each stage.

use crate::error::YuvDeltaError;
use crate::traits::FrameBuffer;

/// An ordered list of same-kind, same-length frames.
///
/// The order is temporal, not just storage order: frame `i` of a delta sequence only
/// means something relative to frame `i - 1`. Every frame pushed must match the length
/// of the first, so the uniform-length invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence<F> {
    frames: Vec<F>,
}

impl<F> Default for FrameSequence<F> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<F: FrameBuffer> FrameSequence<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Builds a sequence from owned frames, validating uniform length.
    pub fn from_frames(frames: Vec<F>) -> Result<Self, YuvDeltaError> {
        let mut seq = Self::with_capacity(frames.len());
        for frame in frames {
            seq.push(frame)?;
        }
        Ok(seq)
    }

    /// Splits a flat buffer into consecutive `frame_len`-byte frames.
    ///
    /// A trailing partial frame is an error here: this is used on data the pipeline
    /// produced itself, where a short tail means the stream is corrupt.
    pub fn split_exact(bytes: &[u8], frame_len: usize) -> Result<Self, YuvDeltaError> {
        if frame_len == 0 {
            return Err(YuvDeltaError::FrameFormat(
                "cannot split a stream into zero-length frames".to_string(),
            ));
        }
        let chunks = bytes.chunks_exact(frame_len);
        let remainder = chunks.remainder().len();
        if remainder != 0 {
            return Err(YuvDeltaError::FrameFormat(format!(
                "{} stream of {} bytes ends with a partial {}-byte frame ({} bytes left over)",
                F::KIND,
                bytes.len(),
                frame_len,
                remainder
            )));
        }
        Ok(Self {
            frames: chunks.map(|c| F::from_bytes(c.to_vec())).collect(),
        })
    }

    /// Appends a frame, rejecting it if its length differs from the first frame's.
    pub fn push(&mut self, frame: F) -> Result<(), YuvDeltaError> {
        if let Some(expected) = self.frame_len() {
            if frame.byte_len() != expected {
                return Err(YuvDeltaError::SequenceLengthMismatch {
                    index: self.frames.len(),
                    expected,
                    actual: frame.byte_len(),
                });
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&F> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.frames.iter()
    }

    /// Length in bytes of every frame, or `None` for an empty sequence.
    pub fn frame_len(&self) -> Option<usize> {
        self.frames.first().map(FrameBuffer::byte_len)
    }

    /// Sum of all frame lengths.
    pub fn total_bytes(&self) -> usize {
        self.frames.iter().map(FrameBuffer::byte_len).sum()
    }

    /// Joins every frame into one flat buffer, in order.
    pub fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_bytes());
        for frame in &self.frames {
            out.extend_from_slice(frame.as_bytes());
        }
        out
    }

    pub fn into_frames(self) -> Vec<F> {
        self.frames
    }
}

impl<F> IntoIterator for FrameSequence<F> {
    type Item = F;
    type IntoIter = std::vec::IntoIter<F>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a, F> IntoIterator for &'a FrameSequence<F> {
    type Item = &'a F;
    type IntoIter = std::slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeltaFrame, YuvFrame};

    #[test]
    fn test_push_rejects_mismatched_length() {
        let mut seq = FrameSequence::new();
        seq.push(DeltaFrame::from_bytes(vec![1, 2, 3])).unwrap();
        let err = seq.push(DeltaFrame::from_bytes(vec![1, 2])).unwrap_err();
        assert!(matches!(
            err,
            YuvDeltaError::SequenceLengthMismatch {
                index: 1,
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn test_split_exact_and_concat() {
        let bytes: Vec<u8> = (0..12).collect();
        let seq = FrameSequence::<YuvFrame>::split_exact(&bytes, 6).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(1).unwrap().as_bytes(), &[6, 7, 8, 9, 10, 11]);
        assert_eq!(seq.total_bytes(), 12);
        assert_eq!(seq.concat(), bytes);
    }

    #[test]
    fn test_split_exact_rejects_partial_tail() {
        let bytes = vec![0u8; 13];
        let result = FrameSequence::<YuvFrame>::split_exact(&bytes, 6);
        assert!(matches!(result, Err(YuvDeltaError::FrameFormat(_))));
    }

    #[test]
    fn test_split_exact_empty_stream() {
        let seq = FrameSequence::<YuvFrame>::split_exact(&[], 6).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.frame_len(), None);
    }
}
