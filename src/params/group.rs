use std::fmt;

/// Named group of parameters.
///
/// Every configurable input belongs to exactly one group; invalidation is
/// tracked per group, never per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamGroup {
    /// Source identifier and range bounds
    Selection,
    /// Processing along the distance axis
    SpaceProcessing,
    /// Processing along the time axis
    TimeProcessing,
    /// Palette and value mapping
    Normalization,
    /// Pick marker appearance
    PickDisplay,
}

impl ParamGroup {
    /// All groups
    pub const ALL: [ParamGroup; 5] = [
        ParamGroup::Selection,
        ParamGroup::SpaceProcessing,
        ParamGroup::TimeProcessing,
        ParamGroup::Normalization,
        ParamGroup::PickDisplay,
    ];

    /// Dotted group name
    pub fn name(self) -> &'static str {
        match self {
            ParamGroup::Selection => "selection",
            ParamGroup::SpaceProcessing => "processing.space",
            ParamGroup::TimeProcessing => "processing.time",
            ParamGroup::Normalization => "normalization",
            ParamGroup::PickDisplay => "pickDisplay",
        }
    }
}

impl fmt::Display for ParamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of value a parameter holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text, parsed when the owning stage runs
    Text,
    /// On/off toggle
    Flag,
    /// Integer choice (palette index, marker size)
    Integer,
}

/// Every configurable input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Param {
    /// Array identifier (dotted path inside a collection)
    SourceId,
    /// Selection start time
    StartTime,
    /// Selection end time
    EndTime,
    /// Selection start distance
    StartDistance,
    /// Selection end distance
    EndDistance,
    /// Integrate along distance
    SpaceIntegrate,
    /// Distance decimation factor
    SpaceDecimation,
    /// Sliding mean removal window (meters)
    SpaceHighpass,
    /// Integrate along time
    TimeIntegrate,
    /// Time decimation factor
    TimeDecimation,
    /// Highpass cutoff frequency (Hz)
    TimeHighpass,
    /// Palette index
    Palette,
    /// Linear range of the symmetric-log mapping
    LinearThreshold,
    /// Saturation value of the symmetric-log mapping
    ValueLimit,
    /// Pick marker size in pixels
    MarkerSize,
}

impl Param {
    /// All parameters, grouped
    pub const ALL: [Param; 15] = [
        Param::SourceId,
        Param::StartTime,
        Param::EndTime,
        Param::StartDistance,
        Param::EndDistance,
        Param::SpaceIntegrate,
        Param::SpaceDecimation,
        Param::SpaceHighpass,
        Param::TimeIntegrate,
        Param::TimeDecimation,
        Param::TimeHighpass,
        Param::Palette,
        Param::LinearThreshold,
        Param::ValueLimit,
        Param::MarkerSize,
    ];

    /// Group the parameter belongs to
    pub fn group(self) -> ParamGroup {
        match self {
            Param::SourceId
            | Param::StartTime
            | Param::EndTime
            | Param::StartDistance
            | Param::EndDistance => ParamGroup::Selection,
            Param::SpaceIntegrate | Param::SpaceDecimation | Param::SpaceHighpass => {
                ParamGroup::SpaceProcessing
            }
            Param::TimeIntegrate | Param::TimeDecimation | Param::TimeHighpass => {
                ParamGroup::TimeProcessing
            }
            Param::Palette | Param::LinearThreshold | Param::ValueLimit => {
                ParamGroup::Normalization
            }
            Param::MarkerSize => ParamGroup::PickDisplay,
        }
    }

    /// Kind of value accepted
    pub fn kind(self) -> ParamKind {
        match self {
            Param::SpaceIntegrate | Param::TimeIntegrate => ParamKind::Flag,
            Param::Palette | Param::MarkerSize => ParamKind::Integer,
            _ => ParamKind::Text,
        }
    }

    /// Field name inside its group
    pub fn name(self) -> &'static str {
        match self {
            Param::SourceId => "source",
            Param::StartTime => "starttime",
            Param::EndTime => "endtime",
            Param::StartDistance => "startdistance",
            Param::EndDistance => "enddistance",
            Param::SpaceIntegrate | Param::TimeIntegrate => "integration",
            Param::SpaceDecimation | Param::TimeDecimation => "decimation",
            Param::SpaceHighpass | Param::TimeHighpass => "highpass",
            Param::Palette => "palette",
            Param::LinearThreshold => "linthresh",
            Param::ValueLimit => "vlim",
            Param::MarkerSize => "size",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group(), self.name())
    }
}
