//! Symmetric-log normalization and auto-ranging.

use chrono::NaiveDateTime;
use ndarray::Array2;
use serde::Serialize;

use crate::params::{NormalizationParameters, Palette};
use crate::signal::Signal;
use crate::timefmt::seconds_to_duration;

/// Logarithm base of the symmetric-log mapping
const LOG_BASE: f64 = 10.0;

/// Width of the linear region in decades
const LINEAR_SCALE: f64 = 1.0;

/// Normalized value of NaN samples (the image midpoint)
const NAN_LEVEL: f64 = 0.5;

/// Value limit used when a signal has no nonzero finite sample
const ZERO_SIGNAL_LIMIT: f64 = 1.0;

/// Where the image lands in axis coordinates.
///
/// Every sample is centered on its pixel, hence the half-spacing offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImagePlacement {
    /// Left edge in distance units (`s0 - ds/2`)
    pub x: f64,
    /// Top edge in time (`t0 - dt/2`)
    pub y: NaiveDateTime,
    /// Width in distance units (`L + ds`)
    pub width: f64,
    /// Height in seconds (`T + dt`)
    pub height: f64,
}

/// Axis ranges that show the whole image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewRange {
    /// Distance range, left to right
    pub x: (f64, f64),
    /// Time range, top (latest) to bottom (earliest) so time runs downward
    pub y: (NaiveDateTime, NaiveDateTime),
}

impl ImagePlacement {
    /// Placement of the pixels of `signal`
    pub fn of(signal: &Signal) -> Self {
        let time = signal.time();
        let distance = signal.distance();
        Self {
            x: distance.start() - distance.step() / 2.0,
            y: time.start() - seconds_to_duration(time.step() / 2.0),
            width: distance.extent() + distance.step(),
            height: time.extent() + time.step(),
        }
    }

    /// Bottom edge in time (`y + height`)
    pub fn y_end(&self) -> NaiveDateTime {
        self.y + seconds_to_duration(self.height)
    }

    /// Home view covering the whole image
    pub fn view_range(&self) -> ViewRange {
        ViewRange {
            x: (self.x, self.x + self.width),
            y: (self.y_end(), self.y),
        }
    }
}

/// Output of the Normalize stage, consumed by the display
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    values: Array2<f64>,
    placement: ImagePlacement,
    palette: Palette,
    value_limit: f64,
    linear_threshold: f64,
}

impl NormalizedImage {
    /// Values in `[0, 1]`, rows are time samples
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Pixel placement in axis coordinates
    pub fn placement(&self) -> &ImagePlacement {
        &self.placement
    }

    /// Palette to color the values with
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Magnitude mapped onto the interval ends
    pub fn value_limit(&self) -> f64 {
        self.value_limit
    }

    /// Half-width of the linear region
    pub fn linear_threshold(&self) -> f64 {
        self.linear_threshold
    }

    /// `(rows, columns)` of the image
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}

/// Matplotlib-style `SymLogNorm` between `-value_limit` and `value_limit`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymLogNorm {
    linear_threshold: f64,
    value_limit: f64,
    linscale_adj: f64,
}

impl SymLogNorm {
    /// Both limits must be positive
    pub fn new(linear_threshold: f64, value_limit: f64) -> Self {
        Self {
            linear_threshold,
            value_limit,
            linscale_adj: LINEAR_SCALE / (1.0 - 1.0 / LOG_BASE),
        }
    }

    fn forward(&self, value: f64) -> f64 {
        let magnitude = value.abs();
        if magnitude <= self.linear_threshold {
            value * self.linscale_adj
        } else {
            value.signum()
                * self.linear_threshold
                * (self.linscale_adj + (magnitude / self.linear_threshold).log(LOG_BASE))
        }
    }

    /// Map `value` into `[0, 1]`, saturating outside the limits
    pub fn apply(&self, value: f64) -> f64 {
        if value.is_nan() {
            return NAN_LEVEL;
        }
        let low = self.forward(-self.value_limit);
        let high = self.forward(self.value_limit);
        ((self.forward(value) - low) / (high - low)).clamp(0.0, 1.0)
    }
}

/// Smallest `k * 10^n` (integer `k >= 1`) not below `max_abs`, returned as
/// `(k, n)`
pub fn nice_ceiling(max_abs: f64) -> (i64, i32) {
    let exponent = max_abs.log10().floor() as i32;
    let mantissa = unscale(max_abs, exponent);
    // Drop representation noise such as 4.300000000000001
    let rounded = (mantissa * 1e12).round() / 1e12;
    let mut k = rounded.ceil() as i64;
    if scaled(k, exponent) < max_abs {
        k += 1;
    }
    (k, exponent)
}

/// `k * 10^n`, dividing for negative exponents so decimal values stay exact
fn scaled(k: i64, exponent: i32) -> f64 {
    if exponent >= 0 {
        k as f64 * 10f64.powi(exponent)
    } else {
        k as f64 / 10f64.powi(-exponent)
    }
}

fn unscale(value: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        value / 10f64.powi(exponent)
    } else {
        value * 10f64.powi(-exponent)
    }
}

/// Fill in missing limits.
///
/// An absent value limit becomes the nice ceiling of the largest magnitude,
/// an absent threshold a tenth of the value limit.
pub fn resolve_limits(
    params: &NormalizationParameters,
    max_abs: f64,
) -> NormalizationParameters {
    let (value_limit, auto_threshold) = match params.value_limit {
        Some(limit) => (limit, limit / 10.0),
        None if max_abs > 0.0 && max_abs.is_finite() => {
            let (k, n) = nice_ceiling(max_abs);
            (scaled(k, n), scaled(k, n - 1))
        }
        None => (ZERO_SIGNAL_LIMIT, ZERO_SIGNAL_LIMIT / 10.0),
    };
    NormalizationParameters {
        palette: params.palette,
        value_limit: Some(value_limit),
        linear_threshold: Some(params.linear_threshold.unwrap_or(auto_threshold)),
    }
}

/// Normalize `signal`, returning the image and the limits actually used
pub fn normalize(
    signal: &Signal,
    params: &NormalizationParameters,
) -> (NormalizedImage, NormalizationParameters) {
    let resolved = resolve_limits(params, signal.max_abs());
    let value_limit = resolved.value_limit.unwrap_or(ZERO_SIGNAL_LIMIT);
    let linear_threshold = resolved.linear_threshold.unwrap_or(value_limit / 10.0);
    let norm = SymLogNorm::new(linear_threshold, value_limit);

    let image = NormalizedImage {
        values: signal.data().mapv(|v| norm.apply(v)),
        placement: ImagePlacement::of(signal),
        palette: resolved.palette,
        value_limit,
        linear_threshold,
    };
    (image, resolved)
}
