use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Param, ParameterError};
use crate::signal::SelectionBounds;
use crate::timefmt::parse_timestamp;

/// Color palette used to display the normalized image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Perceptually uniform sequential palette
    #[default]
    Viridis,
    /// Diverging palette centered on zero
    Seismic,
}

impl Palette {
    /// Palettes in index order
    pub const ALL: [Palette; 2] = [Palette::Viridis, Palette::Seismic];

    /// Palette at `index`
    pub fn from_index(index: i64) -> Option<Palette> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Position inside [`Palette::ALL`]
    pub fn index(self) -> i64 {
        match self {
            Palette::Viridis => 0,
            Palette::Seismic => 1,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Palette::Viridis => "viridis",
            Palette::Seismic => "seismic",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which array to read and which window of it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionParameters {
    /// Array identifier (dotted path inside a collection)
    pub source_id: String,
    /// Inclusive start time
    pub start_time: Option<NaiveDateTime>,
    /// Inclusive end time
    pub end_time: Option<NaiveDateTime>,
    /// Inclusive start distance
    pub start_distance: Option<f64>,
    /// Inclusive end distance
    pub end_distance: Option<f64>,
}

impl SelectionParameters {
    /// Range bounds handed to the signal source
    pub fn bounds(&self) -> SelectionBounds {
        SelectionBounds {
            start_time: self.start_time,
            end_time: self.end_time,
            start_distance: self.start_distance,
            end_distance: self.end_distance,
        }
    }
}

/// Processing steps along one axis. `None` skips the step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisProcessing {
    /// Cumulative integration
    pub integrate: bool,
    /// Decimation factor (1 is identity)
    pub decimation_factor: Option<usize>,
    /// Detrend window (distance, meters) or highpass cutoff (time, Hz)
    pub highpass: Option<f64>,
}

/// Processing steps along both axes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessingParameters {
    /// Distance-axis steps
    pub space: AxisProcessing,
    /// Time-axis steps
    pub time: AxisProcessing,
}

/// Value-to-color mapping settings. Missing limits are auto-ranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParameters {
    /// Display palette
    pub palette: Palette,
    /// Half-width of the linear region
    pub linear_threshold: Option<f64>,
    /// Saturation value
    pub value_limit: Option<f64>,
}

/// Parse optional numeric text.
///
/// Empty text means "absent". Digit-group underscores (`20_000.0`) are
/// accepted between digits.
pub(crate) fn parse_float(param: Param, text: &str) -> Result<Option<f64>, ParameterError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let invalid = || ParameterError::InvalidNumber {
        param,
        text: text.to_string(),
    };

    let cleaned = strip_digit_separators(trimmed).ok_or_else(invalid)?;
    let value: f64 = cleaned.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(Some(value))
}

/// Parse an optional strictly positive number
pub(crate) fn parse_positive(param: Param, text: &str) -> Result<Option<f64>, ParameterError> {
    match parse_float(param, text)? {
        Some(value) if value <= 0.0 => Err(ParameterError::out_of_range(
            param,
            format!("must be positive, got {}", value),
        )),
        other => Ok(other),
    }
}

/// Parse an optional decimation factor (integer >= 1)
pub(crate) fn parse_factor(param: Param, text: &str) -> Result<Option<usize>, ParameterError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let cleaned = strip_digit_separators(trimmed).ok_or_else(|| ParameterError::InvalidNumber {
        param,
        text: text.to_string(),
    })?;
    let factor: i64 = cleaned.parse().map_err(|_| ParameterError::InvalidNumber {
        param,
        text: text.to_string(),
    })?;
    if factor < 1 {
        return Err(ParameterError::out_of_range(
            param,
            format!("decimation factor must be at least 1, got {}", factor),
        ));
    }
    Ok(Some(factor as usize))
}

/// Parse an optional timestamp
pub(crate) fn parse_time(param: Param, text: &str) -> Result<Option<NaiveDateTime>, ParameterError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_timestamp(text)
        .map(Some)
        .ok_or_else(|| ParameterError::InvalidTimestamp {
            param,
            text: text.to_string(),
        })
}

/// Remove `_` separators; `None` when one is not surrounded by digits
fn strip_digit_separators(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }
    let chars: Vec<char> = text.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c == '_' {
            let before = i.checked_sub(1).map(|j| chars[j].is_ascii_digit());
            let after = chars.get(i + 1).map(|c| c.is_ascii_digit());
            if before != Some(true) || after != Some(true) {
                return None;
            }
        }
    }
    Some(chars.into_iter().filter(|c| *c != '_').collect())
}
