use std::collections::{BTreeMap, BTreeSet};

use super::types::{parse_factor, parse_float, parse_positive, parse_time};
use super::{
    AxisProcessing, NormalizationParameters, Palette, Param, ParamGroup, ParamKind,
    ParameterError, ProcessingParameters, SelectionParameters,
};

/// Default pick marker size in pixels
pub const DEFAULT_MARKER_SIZE: i64 = 3;

/// Valid pick marker sizes
pub const MARKER_SIZE_RANGE: std::ops::RangeInclusive<i64> = 1..=50;

/// Current value of one parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Free text
    Text(String),
    /// Toggle state
    Flag(bool),
    /// Integer choice
    Integer(i64),
}

impl ParamValue {
    /// Kind of the value
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Flag(_) => ParamKind::Flag,
            ParamValue::Integer(_) => ParamKind::Integer,
        }
    }

    fn default_for(param: Param) -> Self {
        match param {
            Param::Palette => ParamValue::Integer(Palette::default().index()),
            Param::MarkerSize => ParamValue::Integer(DEFAULT_MARKER_SIZE),
            p if p.kind() == ParamKind::Flag => ParamValue::Flag(false),
            _ => ParamValue::Text(String::new()),
        }
    }
}

/// Set of parameter groups modified since the last apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    groups: BTreeSet<ParamGroup>,
}

impl ChangeSet {
    /// Record a modification of `group`
    pub fn insert(&mut self, group: ParamGroup) {
        self.groups.insert(group);
    }

    /// Whether `group` was modified
    pub fn contains(&self, group: ParamGroup) -> bool {
        self.groups.contains(&group)
    }

    /// Modified groups in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ParamGroup> + '_ {
        self.groups.iter().copied()
    }

    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of modified groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

impl FromIterator<ParamGroup> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ParamGroup>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

/// Holds the current value of every configurable input.
///
/// Writes that actually change a value are recorded in a [`ChangeSet`], which
/// the pipeline drains on the next apply.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    values: BTreeMap<Param, ParamValue>,
    changes: ChangeSet,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Store holding default values (empty texts, toggles off)
    pub fn new() -> Self {
        let values = Param::ALL
            .iter()
            .map(|&p| (p, ParamValue::default_for(p)))
            .collect();
        Self {
            values,
            changes: ChangeSet::default(),
        }
    }

    /// Current value of `param`
    pub fn get(&self, param: Param) -> &ParamValue {
        // Every parameter is seeded in `new`
        &self.values[&param]
    }

    /// Current text of a text parameter (empty for other kinds)
    pub fn text(&self, param: Param) -> &str {
        match self.get(param) {
            ParamValue::Text(text) => text,
            _ => "",
        }
    }

    /// Write a value.
    ///
    /// Returns whether the value changed. Writing the current value records
    /// nothing, so it never triggers a recomputation.
    pub fn set(&mut self, param: Param, value: ParamValue) -> Result<bool, ParameterError> {
        if value.kind() != param.kind() {
            return Err(ParameterError::KindMismatch {
                param,
                expected: param.kind(),
            });
        }
        if let ParamValue::Integer(v) = value {
            validate_integer(param, v)?;
        }
        if self.get(param) == &value {
            return Ok(false);
        }
        self.values.insert(param, value);
        self.changes.insert(param.group());
        Ok(true)
    }

    /// Write a text value
    pub fn set_text(&mut self, param: Param, text: impl Into<String>) -> Result<bool, ParameterError> {
        self.set(param, ParamValue::Text(text.into()))
    }

    /// Write a toggle value
    pub fn set_flag(&mut self, param: Param, active: bool) -> Result<bool, ParameterError> {
        self.set(param, ParamValue::Flag(active))
    }

    /// Write an integer value
    pub fn set_integer(&mut self, param: Param, value: i64) -> Result<bool, ParameterError> {
        self.set(param, ParamValue::Integer(value))
    }

    /// Groups modified since the last [`take_changes`](Self::take_changes)
    pub fn pending_changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Drain the change set
    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }

    /// Immutable copy of every value for one apply cycle
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            values: self.values.clone(),
        }
    }

    /// Show resolved normalization limits in the store.
    ///
    /// Used after auto-ranging. The values describe what was just rendered,
    /// so no change is recorded.
    pub fn write_back_normalization(&mut self, resolved: &NormalizationParameters) {
        for (param, value) in [
            (Param::LinearThreshold, resolved.linear_threshold),
            (Param::ValueLimit, resolved.value_limit),
        ] {
            if let Some(value) = value {
                self.values
                    .insert(param, ParamValue::Text(format_number(value)));
            }
        }
    }
}

/// Immutable view of all parameter values taken at the start of an apply
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSnapshot {
    values: BTreeMap<Param, ParamValue>,
}

impl ParameterSnapshot {
    fn text(&self, param: Param) -> &str {
        match self.values.get(&param) {
            Some(ParamValue::Text(text)) => text,
            _ => "",
        }
    }

    fn flag(&self, param: Param) -> bool {
        matches!(self.values.get(&param), Some(ParamValue::Flag(true)))
    }

    fn integer(&self, param: Param) -> Option<i64> {
        match self.values.get(&param) {
            Some(ParamValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Parse the `selection` group
    pub fn selection(&self) -> Result<SelectionParameters, ParameterError> {
        let selection = SelectionParameters {
            source_id: self.text(Param::SourceId).trim().to_string(),
            start_time: parse_time(Param::StartTime, self.text(Param::StartTime))?,
            end_time: parse_time(Param::EndTime, self.text(Param::EndTime))?,
            start_distance: parse_float(Param::StartDistance, self.text(Param::StartDistance))?,
            end_distance: parse_float(Param::EndDistance, self.text(Param::EndDistance))?,
        };

        if let (Some(start), Some(end)) = (selection.start_time, selection.end_time) {
            if start > end {
                return Err(ParameterError::InvertedBounds {
                    start: Param::StartTime,
                    end: Param::EndTime,
                });
            }
        }
        if let (Some(start), Some(end)) = (selection.start_distance, selection.end_distance) {
            if start > end {
                return Err(ParameterError::InvertedBounds {
                    start: Param::StartDistance,
                    end: Param::EndDistance,
                });
            }
        }
        Ok(selection)
    }

    /// Parse both `processing` groups
    pub fn processing(&self) -> Result<ProcessingParameters, ParameterError> {
        Ok(ProcessingParameters {
            space: AxisProcessing {
                integrate: self.flag(Param::SpaceIntegrate),
                decimation_factor: parse_factor(
                    Param::SpaceDecimation,
                    self.text(Param::SpaceDecimation),
                )?,
                highpass: parse_positive(Param::SpaceHighpass, self.text(Param::SpaceHighpass))?,
            },
            time: AxisProcessing {
                integrate: self.flag(Param::TimeIntegrate),
                decimation_factor: parse_factor(
                    Param::TimeDecimation,
                    self.text(Param::TimeDecimation),
                )?,
                highpass: parse_positive(Param::TimeHighpass, self.text(Param::TimeHighpass))?,
            },
        })
    }

    /// Parse the `normalization` group
    pub fn normalization(&self) -> Result<NormalizationParameters, ParameterError> {
        let index = self.integer(Param::Palette).unwrap_or_default();
        let palette = Palette::from_index(index).ok_or_else(|| {
            ParameterError::out_of_range(Param::Palette, format!("no palette at index {}", index))
        })?;
        Ok(NormalizationParameters {
            palette,
            linear_threshold: parse_positive(
                Param::LinearThreshold,
                self.text(Param::LinearThreshold),
            )?,
            value_limit: parse_positive(Param::ValueLimit, self.text(Param::ValueLimit))?,
        })
    }

    /// Pick marker size
    pub fn marker_size(&self) -> i64 {
        self.integer(Param::MarkerSize)
            .unwrap_or(DEFAULT_MARKER_SIZE)
    }
}

fn validate_integer(param: Param, value: i64) -> Result<(), ParameterError> {
    match param {
        Param::Palette if Palette::from_index(value).is_none() => Err(
            ParameterError::out_of_range(param, format!("no palette at index {}", value)),
        ),
        Param::MarkerSize if !MARKER_SIZE_RANGE.contains(&value) => {
            Err(ParameterError::out_of_range(
                param,
                format!(
                    "marker size must be within {}..={}, got {}",
                    MARKER_SIZE_RANGE.start(),
                    MARKER_SIZE_RANGE.end(),
                    value
                ),
            ))
        }
        _ => Ok(()),
    }
}

/// Shortest text that parses back to `value`
fn format_number(value: f64) -> String {
    format!("{:e}", value)
}
