use super::map_lanes;
use crate::signal::{Signal, SignalAxis};

/// Cumulative integration along `axis`.
///
/// Each output sample is the running sum of the inputs up to and including
/// it, times the axis spacing. Axes are unchanged.
pub fn integrate(signal: &Signal, axis: SignalAxis) -> Signal {
    let step = signal.spacing(axis);
    let data = map_lanes(signal.data(), axis, |lane| cumulative_sum(lane, step));
    signal.with_data(data)
}

fn cumulative_sum(samples: &[f64], step: f64) -> Vec<f64> {
    let mut acc = 0.0;
    samples
        .iter()
        .map(|v| {
            acc += v * step;
            acc
        })
        .collect()
}
