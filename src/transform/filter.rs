//! IIR filtering with cascaded Butterworth biquad sections.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, ToHertz, Type, Q_BUTTERWORTH_F64};

use super::{map_lanes, TransformError};
use crate::signal::{Signal, SignalAxis};

/// Number of cascaded highpass sections
pub(crate) const HIGHPASS_SECTIONS: usize = 2;

/// Causal highpass along `axis` built from cascaded Butterworth sections.
///
/// `cutoff` is in Hz for the time axis (cycles per meter along distance) and
/// must lie below the Nyquist frequency. A single forward pass is run, so the
/// output keeps the causal ordering of the input.
pub fn highpass(signal: &Signal, axis: SignalAxis, cutoff: f64) -> Result<Signal, TransformError> {
    let fs = 1.0 / signal.spacing(axis);
    let coeffs = butterworth(Response::HighPass, fs, cutoff)?;
    let data = map_lanes(signal.data(), axis, |lane| {
        run_cascade(lane, &coeffs, HIGHPASS_SECTIONS)
    });
    Ok(signal.with_data(data))
}

/// Pass band of a biquad section
#[derive(Debug, Clone, Copy)]
pub(crate) enum Response {
    LowPass,
    HighPass,
}

/// Design one Butterworth biquad section
pub(crate) fn butterworth(
    response: Response,
    fs: f64,
    cutoff: f64,
) -> Result<Coefficients<f64>, TransformError> {
    let nyquist = fs / 2.0;
    if !(cutoff > 0.0 && cutoff < nyquist) {
        return Err(TransformError::AboveNyquist { cutoff, nyquist });
    }
    let coeffs = match response {
        Response::LowPass => {
            Coefficients::<f64>::from_params(Type::LowPass, fs.hz(), cutoff.hz(), Q_BUTTERWORTH_F64)
        }
        Response::HighPass => {
            Coefficients::<f64>::from_params(Type::HighPass, fs.hz(), cutoff.hz(), Q_BUTTERWORTH_F64)
        }
    };
    coeffs.map_err(|e| TransformError::FilterDesign(format!("{:?}", e)))
}

/// Run `samples` through `sections` identical biquad sections (at least one).
///
/// Stacking equal Q sections steepens the roll-off but is not a higher-order
/// Butterworth design; the corner ends up below -3 dB.
pub(crate) fn run_cascade(samples: &[f64], coeffs: &Coefficients<f64>, sections: usize) -> Vec<f64> {
    let num_sections = sections.max(1);

    let mut result = samples.to_vec();
    for _ in 0..num_sections {
        // Fresh state per section and per lane
        let mut filter = DirectForm2Transposed::<f64>::new(*coeffs);
        for sample in &mut result {
            *sample = filter.run(*sample);
        }
    }
    result
}
