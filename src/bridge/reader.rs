// In: src/bridge/reader.rs

//! Frame ingest from any `io::Read`.
//!
//! The input is headerless RGB24 frames back to back. A trailing read that cannot
//! fill a whole frame is normal end of stream, and `ReadOutcome::EndOfStream`
//! reports how many tail bytes were dropped. A genuine I/O failure is an `Err`.

use std::io::{ErrorKind, Read};

use crate::error::YuvDeltaError;
use crate::types::{FrameSequence, RawFrame, Resolution};

/// The result of asking a `FrameReader` for one more frame.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Frame(RawFrame),
    /// No further frames. `discarded` counts the bytes of an incomplete trailing
    /// frame, or is zero if the stream ended on a frame boundary.
    EndOfStream { discarded: usize },
}

/// Totals from draining a reader with `read_frames`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub frames: usize,
    pub bytes_read: usize,
    pub discarded_tail: usize,
}

/// Reads fixed-size RGB24 frames from an underlying byte stream.
pub struct FrameReader<R> {
    inner: R,
    res: Resolution,
    finished: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R, res: Resolution) -> Result<Self, YuvDeltaError> {
        res.validate()?;
        Ok(Self {
            inner,
            res,
            finished: false,
        })
    }

    /// Reads the next complete frame. Once `EndOfStream` has been returned, every
    /// later call returns `EndOfStream { discarded: 0 }`.
    pub fn next_frame(&mut self) -> Result<ReadOutcome, YuvDeltaError> {
        if self.finished {
            return Ok(ReadOutcome::EndOfStream { discarded: 0 });
        }

        let mut buf = vec![0u8; self.res.rgb_frame_len()];
        let filled = fill_buffer(&mut self.inner, &mut buf)?;
        if filled == buf.len() {
            return Ok(ReadOutcome::Frame(RawFrame::new(buf, self.res)?));
        }

        self.finished = true;
        if filled > 0 {
            log::debug!(
                "Dropping {} trailing bytes that do not form a full {} frame",
                filled,
                self.res
            );
        }
        Ok(ReadOutcome::EndOfStream { discarded: filled })
    }
}

/// Reads until `buf` is full or the stream hits EOF, returning the bytes filled.
fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, YuvDeltaError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Drains `reader` into an owned frame sequence.
pub fn read_frames<R: Read>(
    reader: R,
    res: Resolution,
) -> Result<(FrameSequence<RawFrame>, IngestSummary), YuvDeltaError> {
    let mut frame_reader = FrameReader::new(reader, res)?;
    let mut frames = FrameSequence::new();
    let mut summary = IngestSummary::default();

    loop {
        match frame_reader.next_frame()? {
            ReadOutcome::Frame(frame) => {
                frames.push(frame)?;
                summary.frames += 1;
                summary.bytes_read += res.rgb_frame_len();
            }
            ReadOutcome::EndOfStream { discarded } => {
                summary.bytes_read += discarded;
                summary.discarded_tail = discarded;
                break;
            }
        }
    }

    log::debug!(
        "Ingested {} frames ({} bytes, {} discarded)",
        summary.frames,
        summary.bytes_read,
        summary.discarded_tail
    );
    Ok((frames, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FrameBuffer;
    use std::io::{self, Cursor};

    /// Hands out at most `step` bytes per read, to exercise the fill loop.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_reads_whole_frames() {
        let res = Resolution::new(2, 2);
        let data: Vec<u8> = (0..24).collect();
        let (frames, summary) = read_frames(Cursor::new(data), res).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.get(1).unwrap().as_bytes()[0], 12);
        assert_eq!(
            summary,
            IngestSummary {
                frames: 2,
                bytes_read: 24,
                discarded_tail: 0
            }
        );
    }

    #[test]
    fn test_partial_tail_is_end_of_stream() {
        let res = Resolution::new(2, 2);
        let mut reader = FrameReader::new(Cursor::new(vec![1u8; 12 + 5]), res).unwrap();
        assert!(matches!(reader.next_frame().unwrap(), ReadOutcome::Frame(_)));
        assert_eq!(
            reader.next_frame().unwrap(),
            ReadOutcome::EndOfStream { discarded: 5 }
        );
        assert_eq!(
            reader.next_frame().unwrap(),
            ReadOutcome::EndOfStream { discarded: 0 }
        );
    }

    #[test]
    fn test_short_reads_are_stitched_together() {
        let res = Resolution::new(2, 2);
        let reader = Trickle {
            data: (0..36).collect(),
            pos: 0,
            step: 5,
        };
        let (frames, summary) = read_frames(reader, res).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.concat(), (0..36).collect::<Vec<u8>>());
        assert_eq!(summary.discarded_tail, 0);
    }

    #[test]
    fn test_empty_stream() {
        let (frames, summary) = read_frames(Cursor::new(Vec::new()), Resolution::new(2, 2)).unwrap();
        assert!(frames.is_empty());
        assert_eq!(summary, IngestSummary::default());
    }

    #[test]
    fn test_io_error_is_reported() {
        let result = read_frames(Broken, Resolution::new(2, 2));
        assert!(matches!(result, Err(YuvDeltaError::Io(_))));
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        let result = FrameReader::new(Cursor::new(Vec::new()), Resolution::new(1, 2));
        assert!(result.is_err());
    }
}
