//! This module contains the pure, stateless kernels for inter-frame delta coding
//! and its cumulative-sum inverse.
//!
//! Unlike an intra-buffer delta, the step here is a whole frame: byte `j` of frame
//! `i` is coded against byte `j` of frame `i - 1`. Frame 0 is the anchor and passes
//! through untouched. All arithmetic wraps, so the transform is exact over `u8`.

use num_traits::{PrimInt, WrappingAdd, WrappingSub};

use crate::error::YuvDeltaError;
use crate::traits::FrameBuffer;
use crate::types::{DeltaFrame, FrameSequence};

//==================================================================================
// 1. Generic Core Logic
//==================================================================================

/// Writes `current[j] - previous[j]` (wrapping) into `out`.
///
/// # Type Parameters
/// * `T`: A primitive integer type that supports wrapping subtraction.
fn diff_slice<T>(current: &[T], previous: &[T], out: &mut Vec<T>)
where
    T: PrimInt + WrappingSub,
{
    out.clear();
    out.extend(
        current
            .iter()
            .zip(previous)
            .map(|(c, p)| c.wrapping_sub(p)),
    );
}

/// Adds `delta[j]` onto `acc[j]` in place (wrapping), turning the previous
/// reconstructed frame into the current one.
///
/// # Type Parameters
/// * `T`: A primitive integer type that supports wrapping addition.
fn integrate_slice<T>(acc: &mut [T], delta: &[T])
where
    T: PrimInt + WrappingAdd,
{
    for (a, d) in acc.iter_mut().zip(delta) {
        *a = a.wrapping_add(d);
    }
}

fn check_same_len(index: usize, expected: usize, actual: usize) -> Result<(), YuvDeltaError> {
    if expected != actual {
        return Err(YuvDeltaError::SequenceLengthMismatch {
            index,
            expected,
            actual,
        });
    }
    Ok(())
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Forward delta: frame 0 verbatim, then each frame minus its ORIGINAL predecessor.
pub fn diff<F: FrameBuffer>(
    frames: &FrameSequence<F>,
) -> Result<FrameSequence<DeltaFrame>, YuvDeltaError> {
    let mut out = FrameSequence::with_capacity(frames.len());
    let mut previous: Option<&[u8]> = None;

    for (index, frame) in frames.iter().enumerate() {
        let current = frame.as_bytes();
        let delta = match previous {
            None => current.to_vec(),
            Some(prev) => {
                check_same_len(index, prev.len(), current.len())?;
                let mut buf = Vec::with_capacity(current.len());
                diff_slice(current, prev, &mut buf);
                buf
            }
        };
        out.push(DeltaFrame::from_bytes(delta))?;
        previous = Some(current);
    }
    Ok(out)
}

/// Inverse delta: a left fold where each frame is its delta added onto the
/// ALREADY-RECONSTRUCTED predecessor.
///
/// Reconstruction is strictly sequential. A corrupted byte in delta `i` shows up at
/// the same offset in every frame from `i` onwards; nothing re-anchors the stream.
pub fn integrate<F: FrameBuffer>(
    deltas: FrameSequence<DeltaFrame>,
) -> Result<FrameSequence<F>, YuvDeltaError> {
    let mut out: FrameSequence<F> = FrameSequence::with_capacity(deltas.len());

    for (index, delta) in deltas.into_iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|i| out.get(i));
        let frame = match previous {
            None => delta.into_bytes(),
            Some(prev) => {
                check_same_len(index, prev.byte_len(), delta.byte_len())?;
                // Addition commutes, so the delta's own buffer becomes the frame.
                let mut buf = delta.into_bytes();
                integrate_slice(&mut buf, prev.as_bytes());
                buf
            }
        };
        out.push(F::from_bytes(frame))?;
    }
    Ok(out)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
