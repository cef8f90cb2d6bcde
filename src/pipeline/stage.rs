use std::collections::BTreeSet;
use std::fmt;

use crate::params::ParamGroup;

/// Pipeline stage, ordered by execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Read the selected block from the signal source
    Load,
    /// Apply the configured transforms
    Process,
    /// Map values onto the unit interval
    Normalize,
}

/// Minimal stage each parameter group feeds. `None` means the group only
/// affects display and never invalidates a stage.
const DEPENDENCIES: [(ParamGroup, Option<Stage>); 5] = [
    (ParamGroup::Selection, Some(Stage::Load)),
    (ParamGroup::SpaceProcessing, Some(Stage::Process)),
    (ParamGroup::TimeProcessing, Some(Stage::Process)),
    (ParamGroup::Normalization, Some(Stage::Normalize)),
    (ParamGroup::PickDisplay, None),
];

impl Stage {
    /// Stages in execution order
    pub const ALL: [Stage; 3] = [Stage::Load, Stage::Process, Stage::Normalize];

    /// First stage invalidated by a change in `group`
    pub fn invalidated_by(group: ParamGroup) -> Option<Stage> {
        DEPENDENCIES
            .iter()
            .find(|(g, _)| *g == group)
            .and_then(|(_, stage)| *stage)
    }

    /// This stage and every later one
    pub fn and_downstream(self) -> impl Iterator<Item = Stage> {
        Self::ALL.into_iter().filter(move |s| *s >= self)
    }

    /// Lowercase stage name
    pub fn name(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Process => "process",
            Stage::Normalize => "normalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-stage dirty bits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtySet {
    stages: BTreeSet<Stage>,
}

impl DirtySet {
    /// Every stage dirty, the state before the first apply
    pub fn all() -> Self {
        Self {
            stages: Stage::ALL.into_iter().collect(),
        }
    }

    /// Nothing dirty
    pub fn clean() -> Self {
        Self {
            stages: BTreeSet::new(),
        }
    }

    /// Mark the stages fed by `group` dirty
    pub fn invalidate(&mut self, group: ParamGroup) {
        if let Some(stage) = Stage::invalidated_by(group) {
            self.mark_from(stage);
        }
    }

    /// Mark `stage` and everything after it dirty
    pub fn mark_from(&mut self, stage: Stage) {
        self.stages.extend(stage.and_downstream());
    }

    /// Whether `stage` needs to run
    pub fn is_dirty(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Clear the bit of a stage that just recomputed
    pub fn clear(&mut self, stage: Stage) {
        self.stages.remove(&stage);
    }

    /// Dirty stages in execution order
    pub fn dirty_stages(&self) -> Vec<Stage> {
        self.stages.iter().copied().collect()
    }

    /// True when every cached value is current
    pub fn is_clean(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for DirtySet {
    fn default() -> Self {
        Self::all()
    }
}
