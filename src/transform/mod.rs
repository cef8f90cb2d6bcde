//! # Transform Module
//!
//! Pure numeric transforms applied by the Process stage. Every function takes
//! a [`Signal`] by reference and returns a new one; nothing here keeps state
//! between calls, so identical inputs always produce bit-identical outputs.
//!
//! ## Processing Order
//!
//! [`process`] applies the steps in a fixed order. Integration and decimation
//! do not commute, so the order is part of the contract:
//!
//! 1. distance integration
//! 2. distance decimation (zero-phase FIR)
//! 3. distance sliding mean removal
//! 4. time integration
//! 5. time decimation (causal IIR)
//! 6. time highpass (causal IIR)
//! 7. calibration gain ([`GAIN`])
//!
//! A step whose parameter is absent is skipped; a decimation factor of 1 is
//! also skipped.

mod decimate;
mod detrend;
mod error;
mod filter;
mod integrate;


pub use decimate::{decimate_causal, decimate_zero_phase, firwin_lowpass};
pub use detrend::sliding_mean_removal;
pub use error::TransformError;
pub use filter::highpass;
pub use integrate::integrate;

use log::debug;
use ndarray::Array2;

use crate::params::{Param, ParameterError, ProcessingParameters};
use crate::signal::{Signal, SignalAxis};

/// Strain-rate calibration constant applied last
pub const GAIN: f64 = 1.08e-7;

/// Apply all configured steps in the fixed order
pub fn process(signal: &Signal, params: &ProcessingParameters) -> Result<Signal, ParameterError> {
    let mut signal = signal.clone();

    // distance
    if params.space.integrate {
        signal = integrate(&signal, SignalAxis::Distance);
    }
    if let Some(q) = checked_factor(
        &signal,
        SignalAxis::Distance,
        params.space.decimation_factor,
        Param::SpaceDecimation,
    )? {
        signal = decimate_zero_phase(&signal, SignalAxis::Distance, q);
    }
    if let Some(wlen) = params.space.highpass {
        signal = sliding_mean_removal(&signal, SignalAxis::Distance, wlen)
            .map_err(|e| ParameterError::out_of_range(Param::SpaceHighpass, e.to_string()))?;
    }

    // time
    if params.time.integrate {
        signal = integrate(&signal, SignalAxis::Time);
    }
    if let Some(q) = checked_factor(
        &signal,
        SignalAxis::Time,
        params.time.decimation_factor,
        Param::TimeDecimation,
    )? {
        signal = decimate_causal(&signal, SignalAxis::Time, q)
            .map_err(|e| ParameterError::out_of_range(Param::TimeDecimation, e.to_string()))?;
    }
    if let Some(freq) = params.time.highpass {
        signal = highpass(&signal, SignalAxis::Time, freq)
            .map_err(|e| ParameterError::out_of_range(Param::TimeHighpass, e.to_string()))?;
    }

    Ok(scale(&signal, GAIN))
}

/// Multiply every sample by `factor`
pub fn scale(signal: &Signal, factor: f64) -> Signal {
    signal.with_data(signal.data().mapv(|v| v * factor))
}

/// Decimation factor to apply, if any. Factors beyond the axis length are
/// rejected.
fn checked_factor(
    signal: &Signal,
    axis: SignalAxis,
    factor: Option<usize>,
    param: Param,
) -> Result<Option<usize>, ParameterError> {
    let Some(q) = effective_factor(factor) else {
        return Ok(None);
    };
    let len = match axis {
        SignalAxis::Time => signal.time().len(),
        SignalAxis::Distance => signal.distance().len(),
    };
    if q > len {
        return Err(ParameterError::out_of_range(
            param,
            format!(
                "decimation factor {} exceeds the {} samples along {}",
                q,
                len,
                axis.name()
            ),
        ));
    }
    Ok(Some(q))
}

fn effective_factor(factor: Option<usize>) -> Option<usize> {
    match factor {
        Some(q) if q > 1 => Some(q),
        Some(_) => {
            debug!("Decimation factor 1, skipping");
            None
        }
        None => None,
    }
}

/// Apply `f` to every 1-D lane along `axis` and reassemble the matrix.
///
/// All lanes must come back with the same length, which becomes the new
/// length of `axis`.
pub(crate) fn map_lanes<F>(data: &Array2<f64>, axis: SignalAxis, f: F) -> Array2<f64>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let lanes: Vec<Vec<f64>> = data
        .lanes(axis.ndarray_axis())
        .into_iter()
        .map(|lane| f(&lane.to_vec()))
        .collect();
    let len = lanes.first().map_or(0, Vec::len);

    match axis {
        SignalAxis::Time => Array2::from_shape_fn((len, lanes.len()), |(i, j)| lanes[j][i]),
        SignalAxis::Distance => Array2::from_shape_fn((lanes.len(), len), |(i, j)| lanes[i][j]),
    }
}
