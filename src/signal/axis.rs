use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::timefmt::{duration_to_seconds, seconds_to_duration};

/// One of the two dimensions of a sample block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalAxis {
    /// Rows of the sample matrix
    Time,
    /// Columns of the sample matrix
    Distance,
}

impl SignalAxis {
    /// Matching ndarray axis (time = rows, distance = columns)
    pub fn ndarray_axis(self) -> ndarray::Axis {
        match self {
            SignalAxis::Time => ndarray::Axis(0),
            SignalAxis::Distance => ndarray::Axis(1),
        }
    }

    /// Short lowercase name used in log output
    pub fn name(self) -> &'static str {
        match self {
            SignalAxis::Time => "time",
            SignalAxis::Distance => "distance",
        }
    }
}

/// Uniformly sampled time axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    start: NaiveDateTime,
    step: f64,
    len: usize,
}

impl TimeAxis {
    /// Create a time axis from its origin, sampling interval (seconds) and length
    pub fn new(start: NaiveDateTime, step: f64, len: usize) -> Self {
        Self { start, step, len }
    }

    /// First timestamp (`t0`)
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Sampling interval in seconds (`dt`)
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the axis holds no sample
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Timestamp of sample `index`
    pub fn value(&self, index: usize) -> NaiveDateTime {
        self.start + seconds_to_duration(index as f64 * self.step)
    }

    /// Span between first and last sample in seconds (`T`)
    pub fn extent(&self) -> f64 {
        self.len.saturating_sub(1) as f64 * self.step
    }

    /// Index range of samples inside the inclusive bounds
    pub fn index_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Range<usize> {
        let offset = |t: NaiveDateTime| duration_to_seconds(t - self.start) / self.step;
        bounded_range(start.map(offset), end.map(offset), self.len)
    }

    pub(crate) fn sliced(&self, range: &Range<usize>) -> Self {
        Self::new(self.value(range.start), self.step, range.len())
    }

    pub(crate) fn decimated(&self, factor: usize) -> Self {
        Self::new(self.start, self.step * factor as f64, decimated_len(self.len, factor))
    }
}

/// Uniformly sampled distance axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceAxis {
    start: f64,
    step: f64,
    len: usize,
}

impl DistanceAxis {
    /// Create a distance axis from its origin, spacing (meters) and length
    pub fn new(start: f64, step: f64, len: usize) -> Self {
        Self { start, step, len }
    }

    /// First position (`s0`)
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Channel spacing (`ds`)
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the axis holds no channel
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position of channel `index`
    pub fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    /// Span between first and last channel (`L`)
    pub fn extent(&self) -> f64 {
        self.len.saturating_sub(1) as f64 * self.step
    }

    /// Index range of channels inside the inclusive bounds
    pub fn index_range(&self, start: Option<f64>, end: Option<f64>) -> Range<usize> {
        let offset = |s: f64| (s - self.start) / self.step;
        bounded_range(start.map(offset), end.map(offset), self.len)
    }

    pub(crate) fn sliced(&self, range: &Range<usize>) -> Self {
        Self::new(self.value(range.start), self.step, range.len())
    }

    pub(crate) fn decimated(&self, factor: usize) -> Self {
        Self::new(self.start, self.step * factor as f64, decimated_len(self.len, factor))
    }
}

/// Tolerance (in samples) absorbing rounding of bounds that sit on a sample
const INDEX_TOLERANCE: f64 = 1e-6;

/// Convert fractional sample offsets of inclusive bounds to an index range
fn bounded_range(start: Option<f64>, end: Option<f64>, len: usize) -> Range<usize> {
    let first = match start {
        Some(offset) => (offset - INDEX_TOLERANCE).ceil().max(0.0),
        None => 0.0,
    };
    let last = match end {
        Some(offset) => (offset + INDEX_TOLERANCE).floor() + 1.0,
        None => len as f64,
    };
    let first = (first.min(len as f64)) as usize;
    let last = (last.clamp(0.0, len as f64)) as usize;
    if last <= first {
        first..first
    } else {
        first..last
    }
}

fn decimated_len(len: usize, factor: usize) -> usize {
    (len + factor - 1) / factor
}
