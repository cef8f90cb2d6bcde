//! Anti-aliased downsampling.
//!
//! Distance is not a causal axis, so it gets a symmetric FIR applied around
//! each output sample (zero phase). Time keeps its causal ordering and gets a
//! forward-only IIR low-pass.

use std::f64::consts::PI;

use super::filter::{butterworth, run_cascade, Response};
use super::{map_lanes, TransformError};
use crate::signal::{Signal, SignalAxis};

/// FIR length per unit of decimation factor
const FIR_TAPS_PER_FACTOR: usize = 20;

/// Number of cascaded low-pass sections in the causal anti-aliasing filter
const IIR_SECTIONS: usize = 4;

/// Low-pass corner as a fraction of the decimated Nyquist frequency
const IIR_CUTOFF_RATIO: f64 = 0.8;

/// Zero-phase FIR decimation along `axis`.
///
/// Uses a Hamming-windowed sinc of `20 * factor + 1` taps with its corner at
/// the new Nyquist frequency, centered on each kept sample (zero padded at the
/// edges). Keeps samples `0, factor, 2 * factor, ...`; the origin is preserved
/// and the spacing multiplied by `factor`.
///
/// The filter length grows with `factor`, so callers keep it within the axis
/// length ([`process`](super::process) rejects larger factors).
pub fn decimate_zero_phase(signal: &Signal, axis: SignalAxis, factor: usize) -> Signal {
    if factor <= 1 {
        return signal.clone();
    }
    let taps = firwin_lowpass(FIR_TAPS_PER_FACTOR * factor + 1, 1.0 / factor as f64);
    let data = map_lanes(signal.data(), axis, |lane| {
        centered_fir_downsample(lane, &taps, factor)
    });
    signal.decimated(axis, factor, data)
}

/// Causal IIR decimation along `axis`.
///
/// Runs four cascaded Butterworth low-pass sections, each with its corner at
/// 80% of the new Nyquist frequency, forward over each lane, then keeps every `factor`-th
/// sample starting with the first.
pub fn decimate_causal(
    signal: &Signal,
    axis: SignalAxis,
    factor: usize,
) -> Result<Signal, TransformError> {
    if factor <= 1 {
        return Ok(signal.clone());
    }
    let fs = 1.0 / signal.spacing(axis);
    let cutoff = IIR_CUTOFF_RATIO * (fs / 2.0) / factor as f64;
    let coeffs = butterworth(Response::LowPass, fs, cutoff)?;
    let data = map_lanes(signal.data(), axis, |lane| {
        run_cascade(lane, &coeffs, IIR_SECTIONS)
            .into_iter()
            .step_by(factor)
            .collect()
    });
    Ok(signal.decimated(axis, factor, data))
}

/// Windowed-sinc low-pass FIR design (Hamming window, unit DC gain).
///
/// `cutoff` is relative to the Nyquist frequency (0 < cutoff <= 1).
pub fn firwin_lowpass(num_taps: usize, cutoff: f64) -> Vec<f64> {
    if num_taps <= 1 {
        return vec![1.0; num_taps];
    }
    let m = (num_taps - 1) as f64;
    let mut taps: Vec<f64> = (0..num_taps)
        .map(|n| {
            let x = n as f64 - m / 2.0;
            let window = 0.54 - 0.46 * (2.0 * PI * n as f64 / m).cos();
            cutoff * sinc(cutoff * x) * window
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    if sum != 0.0 {
        for tap in &mut taps {
            *tap /= sum;
        }
    }
    taps
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Filter with a centered odd-length FIR, evaluated only at kept samples
fn centered_fir_downsample(samples: &[f64], taps: &[f64], factor: usize) -> Vec<f64> {
    let half = (taps.len() / 2) as isize;
    let len = samples.len() as isize;
    (0..samples.len())
        .step_by(factor)
        .map(|i| {
            taps.iter()
                .enumerate()
                .filter_map(|(k, tap)| {
                    let j = i as isize + k as isize - half;
                    (0..len).contains(&j).then(|| tap * samples[j as usize])
                })
                .sum::<f64>()
        })
        .collect()
}
