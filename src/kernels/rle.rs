//! This module contains the pure, stateless kernels for byte-oriented Run-Length
//! Encoding (RLE) and decoding.
//!
//! The format is a flat sequence of `(count, value)` byte pairs, with `count` in
//! `1..=255`. A run longer than 255 bytes is split across several pairs. In this
//! crate the coder only feeds a size statistic for the delta stream; its output is
//! never persisted or used for reconstruction.

use crate::error::YuvDeltaError;

/// Longest run a single pair can describe.
pub const MAX_RUN: usize = u8::MAX as usize;

//==================================================================================
// 1. The Record Type
//==================================================================================

/// One `(count, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub count: u8,
    pub value: u8,
}

/// An ordered list of runs that expands to `sum(count)` bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLengthRecord {
    runs: Vec<Run>,
}

impl RunLengthRecord {
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Size of the serialized record: two bytes per run.
    pub fn encoded_len(&self) -> usize {
        self.runs.len() * 2
    }

    /// Number of bytes the record expands to.
    pub fn decoded_len(&self) -> usize {
        self.runs.iter().map(|r| r.count as usize).sum()
    }

    /// Serializes to the flat `count, value, count, value, ...` layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for run in &self.runs {
            out.push(run.count);
            out.push(run.value);
        }
        out
    }

    /// Parses the flat pair layout. Rejects odd lengths and zero-length runs.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, YuvDeltaError> {
        if bytes.len() % 2 != 0 {
            return Err(YuvDeltaError::RleDecode(format!(
                "Truncated buffer: {} bytes is not a whole number of pairs",
                bytes.len()
            )));
        }
        let mut runs = Vec::with_capacity(bytes.len() / 2);
        for (i, pair) in bytes.chunks_exact(2).enumerate() {
            if pair[0] == 0 {
                return Err(YuvDeltaError::RleDecode(format!(
                    "Run {} has a zero count",
                    i
                )));
            }
            runs.push(Run {
                count: pair[0],
                value: pair[1],
            });
        }
        Ok(Self { runs })
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Scans left to right, emitting one run per maximal stretch of identical bytes,
/// capped at `MAX_RUN`.
pub fn encode(input: &[u8]) -> RunLengthRecord {
    let mut runs = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let value = input[pos];
        let count = input[pos..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&b| b == value)
            .count();
        runs.push(Run {
            count: count as u8,
            value,
        });
        pos += count;
    }

    RunLengthRecord { runs }
}

/// Replays each run as `count` copies of `value`.
pub fn decode(record: &RunLengthRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(record.decoded_len());
    for run in &record.runs {
        out.resize(out.len() + run.count as usize, run.value);
    }
    out
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
