use super::{map_lanes, TransformError};
use crate::signal::{Signal, SignalAxis};

/// Remove a sliding mean along `axis`.
///
/// `window` is a physical length in axis units. It is converted to an odd
/// number of samples and centered on each sample; near the edges the window
/// is truncated to the samples that exist.
pub fn sliding_mean_removal(
    signal: &Signal,
    axis: SignalAxis,
    window: f64,
) -> Result<Signal, TransformError> {
    if !(window.is_finite() && window > 0.0) {
        return Err(TransformError::InvalidWindow(window));
    }
    let mut samples = (window / signal.spacing(axis)).round() as usize;
    if samples % 2 == 0 {
        samples += 1;
    }
    let half = samples / 2;

    let data = map_lanes(signal.data(), axis, |lane| remove_mean(lane, half));
    Ok(signal.with_data(data))
}

fn remove_mean(samples: &[f64], half: usize) -> Vec<f64> {
    let mut prefix = Vec::with_capacity(samples.len() + 1);
    prefix.push(0.0);
    for v in samples {
        prefix.push(prefix[prefix.len() - 1] + v);
    }

    samples
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(samples.len());
            let mean = (prefix[hi] - prefix[lo]) / (hi - lo) as f64;
            v - mean
        })
        .collect()
}
