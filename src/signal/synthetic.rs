//! Synthetic DAS records.
//!
//! Generates strain-rate like blocks with a P and an S arrival following a
//! linear moveout, buried in deterministic noise. Used by the `demo` command,
//! by tests and by benchmarks.

use chrono::{NaiveDate, NaiveDateTime};
use ndarray::Array2;
use std::f64::consts::PI;

use super::{DataNode, DistanceAxis, Signal, SourceError, TimeAxis};
use crate::timefmt::seconds_to_duration;

/// A point source observed along the fiber
#[derive(Debug, Clone, Copy)]
pub struct SyntheticEvent {
    /// Origin time, in seconds after the record start
    pub origin: f64,
    /// Epicentral position along the fiber in meters
    pub position: f64,
    /// P-wave apparent velocity (m/s)
    pub p_velocity: f64,
    /// S-wave apparent velocity (m/s)
    pub s_velocity: f64,
    /// Peak amplitude of the S arrival (the P arrival is half of it)
    pub amplitude: f64,
    /// Dominant frequency of the Ricker wavelet (Hz)
    pub frequency: f64,
}

impl Default for SyntheticEvent {
    fn default() -> Self {
        Self {
            origin: 2.0,
            position: 60_000.0,
            p_velocity: 6_000.0,
            s_velocity: 3_500.0,
            amplitude: 50.0,
            frequency: 5.0,
        }
    }
}

impl SyntheticEvent {
    /// P travel time in seconds (after record start) at `distance`
    pub fn p_arrival(&self, distance: f64) -> f64 {
        self.origin + (distance - self.position).abs() / self.p_velocity
    }

    /// S travel time in seconds (after record start) at `distance`
    pub fn s_arrival(&self, distance: f64) -> f64 {
        self.origin + (distance - self.position).abs() / self.s_velocity
    }
}

/// Geometry of a synthetic record
#[derive(Debug, Clone, Copy)]
pub struct SyntheticLayout {
    /// Record start time
    pub start: NaiveDateTime,
    /// Number of time samples
    pub times: usize,
    /// Sampling interval in seconds
    pub dt: f64,
    /// First channel position in meters
    pub s0: f64,
    /// Number of channels
    pub distances: usize,
    /// Channel spacing in meters
    pub ds: f64,
    /// Noise amplitude
    pub noise: f64,
    /// Noise generator seed
    pub seed: u64,
}

impl Default for SyntheticLayout {
    fn default() -> Self {
        Self {
            start: demo_start(),
            times: 1_000,
            dt: 0.01,
            s0: 20_000.0,
            distances: 400,
            ds: 250.0,
            noise: 2.0,
            seed: 42,
        }
    }
}

/// Start of the bundled demo records (2021-11-13T01:41:00)
pub fn demo_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 11, 13)
        .and_then(|d| d.and_hms_opt(1, 41, 0))
        .unwrap_or_default()
}

/// Generate one record holding `event`
pub fn synthetic_record(
    layout: &SyntheticLayout,
    event: &SyntheticEvent,
) -> Result<Signal, SourceError> {
    let mut rng = XorShift::new(layout.seed);
    let data = Array2::from_shape_fn((layout.times, layout.distances), |(i, j)| {
        let t = i as f64 * layout.dt;
        let s = layout.s0 + j as f64 * layout.ds;
        let p = 0.5 * event.amplitude * ricker(t - event.p_arrival(s), event.frequency);
        let s_wave = event.amplitude * ricker(t - event.s_arrival(s), event.frequency);
        p + s_wave + layout.noise * rng.next_signed()
    });

    let time = TimeAxis::new(layout.start, layout.dt, layout.times);
    let distance = DistanceAxis::new(layout.s0, layout.ds, layout.distances);
    Signal::new(data, time, distance)
}

/// Demo collection: two stations, three channels in total
pub fn demo_collection() -> Result<DataNode, SourceError> {
    let layout = SyntheticLayout::default();
    let event = SyntheticEvent::default();
    let later = SyntheticLayout {
        start: layout.start + seconds_to_duration(layout.times as f64 * layout.dt),
        seed: 7,
        ..layout
    };

    Ok(DataNode::mapping([
        (
            "stationA",
            DataNode::mapping([
                ("channel1", DataNode::array(synthetic_record(&layout, &event)?)),
                (
                    "channel2",
                    DataNode::array(synthetic_record(
                        &SyntheticLayout { seed: 11, ..layout },
                        &SyntheticEvent {
                            position: 90_000.0,
                            ..event
                        },
                    )?),
                ),
            ]),
        ),
        (
            "stationB",
            DataNode::mapping([(
                "channel1",
                DataNode::Sequence(vec![DataNode::array(synthetic_record(&later, &event)?)]),
            )]),
        ),
    ]))
}

/// Ricker wavelet centered on zero
fn ricker(t: f64, frequency: f64) -> f64 {
    let a = (PI * frequency * t).powi(2);
    (1.0 - 2.0 * a) * (-a).exp()
}

/// Minimal deterministic noise generator
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_signed(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}
