//! # Signal Module
//!
//! A [`Signal`] is a 2-D block of amplitude samples indexed by time (rows) and
//! distance along the fiber (columns). Both axes are sorted ascending and
//! uniformly sampled; every transform that changes an axis length re-derives
//! its spacing.
//!
//! Signals come from a [`SignalSource`]. The in-memory [`DataNode`] tree is the
//! bundled implementation: single arrays, named mappings addressed by dotted
//! keys (`"stationA.channel1"`) and transparent sequences.

mod axis;
mod error;
mod source;
pub mod synthetic;

#[cfg(test)]
mod tests;

pub use axis::{DistanceAxis, SignalAxis, TimeAxis};
pub use error::SourceError;
pub use source::{DataArray, DataNode, SelectionBounds, SignalSource};

use ndarray::Array2;
use std::ops::Range;

/// Time/distance indexed block of samples
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    data: Array2<f64>,
    time: TimeAxis,
    distance: DistanceAxis,
}

impl Signal {
    /// Create a signal, checking that the axes describe the sample matrix
    pub fn new(
        data: Array2<f64>,
        time: TimeAxis,
        distance: DistanceAxis,
    ) -> Result<Self, SourceError> {
        if data.nrows() != time.len() || data.ncols() != distance.len() {
            return Err(SourceError::InvalidArray(format!(
                "data shape {:?} does not match axes ({} times, {} distances)",
                data.shape(),
                time.len(),
                distance.len()
            )));
        }
        for (axis, step) in [("time", time.step()), ("distance", distance.step())] {
            if !(step.is_finite() && step > 0.0) {
                return Err(SourceError::InvalidArray(format!(
                    "{} spacing must be positive, got {}",
                    axis, step
                )));
            }
        }
        Ok(Self {
            data,
            time,
            distance,
        })
    }

    /// Sample matrix (rows = time, columns = distance)
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Time axis
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Distance axis
    pub fn distance(&self) -> &DistanceAxis {
        &self.distance
    }

    /// Matrix shape as `(times, distances)`
    pub fn shape(&self) -> (usize, usize) {
        (self.time.len(), self.distance.len())
    }

    /// Total number of samples
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// True when the block holds no sample
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sampling interval along `axis`
    pub fn spacing(&self, axis: SignalAxis) -> f64 {
        match axis {
            SignalAxis::Time => self.time.step(),
            SignalAxis::Distance => self.distance.step(),
        }
    }

    /// Largest finite absolute sample value (0 for an empty block)
    pub fn max_abs(&self) -> f64 {
        self.data
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Sub-block covering the given index ranges
    pub fn slice(&self, times: Range<usize>, distances: Range<usize>) -> Signal {
        let data = self
            .data
            .slice(ndarray::s![times.clone(), distances.clone()])
            .to_owned();
        Signal {
            data,
            time: self.time.sliced(&times),
            distance: self.distance.sliced(&distances),
        }
    }

    /// Replace the samples, keeping both axes (shape must not change)
    pub(crate) fn with_data(&self, data: Array2<f64>) -> Signal {
        debug_assert_eq!(data.dim(), self.data.dim());
        Signal {
            data,
            time: self.time,
            distance: self.distance,
        }
    }

    /// Replace the samples after downsampling `axis` by `factor`
    pub(crate) fn decimated(&self, axis: SignalAxis, factor: usize, data: Array2<f64>) -> Signal {
        let (time, distance) = match axis {
            SignalAxis::Time => (self.time.decimated(factor), self.distance),
            SignalAxis::Distance => (self.time, self.distance.decimated(factor)),
        };
        debug_assert_eq!(data.dim(), (time.len(), distance.len()));
        Signal {
            data,
            time,
            distance,
        }
    }
}
