//! # Session Module
//!
//! A [`Session`] ties one signal source to the parameter store, the pipeline,
//! the pick store and the phase registry. It is driven by discrete
//! [`Action`]s, each handled to completion; every action yields a
//! [`StatusMessage`] and no failure ends the session.
//!
//! Parameter writes only record which groups changed. Nothing is recomputed
//! until [`Action::Apply`]. Pick actions never touch the pipeline.

mod action;

#[cfg(test)]
mod tests;

pub use action::{Action, StatusLevel, StatusMessage};

use chrono::NaiveDateTime;
use log::{info, warn};
use std::path::Path;

use crate::config::{ConfigError, SessionConfig, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use crate::params::{Param, ParamValue, ParameterStore, DEFAULT_MARKER_SIZE};
use crate::phases::{PhaseRegistry, Rgb};
use crate::pipeline::{NormalizedImage, PipelineEngine, Stage};
use crate::picks::{PickSelection, PickStore};
use crate::signal::SignalSource;

/// Single-user interactive session over one signal source
#[derive(Debug)]
pub struct Session<S: SignalSource> {
    source: S,
    params: ParameterStore,
    engine: PipelineEngine,
    picks: PickStore,
    phases: PhaseRegistry,
    active_phase: String,
    canvas: (u32, u32),
    status: StatusMessage,
}

impl<S: SignalSource> Session<S> {
    /// Session with default parameters, no picks and the first phase active
    pub fn new(source: S, phases: PhaseRegistry) -> Self {
        let status = match phases.warnings().first() {
            Some(mismatch) => StatusMessage::warning(mismatch.to_string()),
            None => StatusMessage::info("Ready"),
        };
        Self {
            source,
            params: ParameterStore::new(),
            engine: PipelineEngine::new(),
            picks: PickStore::new(),
            active_phase: phases.first().label.clone(),
            phases,
            canvas: (DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT),
            status,
        }
    }

    /// Session configured from the startup configuration.
    ///
    /// The first configured source, if any, is preselected.
    pub fn from_config(source: S, config: &SessionConfig) -> Result<Self, ConfigError> {
        let (width, height) = config.image_size()?;
        let mut session = Self::new(source, config.build_phases()?).with_canvas(width, height);
        if let Some(first) = config.sources.first() {
            // A text parameter accepts any text
            let _ = session.params.set_text(Param::SourceId, first.clone());
        }
        Ok(session)
    }

    /// Set the rendered image size in pixels
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = (width, height);
        self
    }

    /// Handle one action and return its outcome
    pub fn handle(&mut self, action: Action) -> &StatusMessage {
        self.status = match action {
            Action::SetParam { param, value } => self.set_param(param, value),
            Action::Apply => self.apply(),
            Action::AddPick { time, distance } => self.add_pick(time, distance),
            Action::CommitStroke => {
                let removed = self.picks.commit_stroke(&self.active_phase);
                StatusMessage::info(format!(
                    "Committed {} stroke, replaced {} picks",
                    self.active_phase, removed
                ))
            }
            Action::DeletePicks(selection) => self.delete_picks(&selection),
            Action::ResetPicks => {
                self.picks.reset();
                StatusMessage::info("Picks reset")
            }
            Action::SavePicks(path) => self.save_picks(&path),
            Action::LoadPicks(path) => self.load_picks(&path),
            Action::SelectPhase(label) => self.select_phase(label),
            Action::SetPhaseColor { label, color } => self.set_phase_color(&label, color),
        };
        if self.status.is_error() {
            warn!("{}", self.status.text);
        }
        &self.status
    }

    fn set_param(&mut self, param: Param, value: ParamValue) -> StatusMessage {
        match self.params.set(param, value) {
            Ok(true) => StatusMessage::info(format!("{} changed", param)),
            Ok(false) => StatusMessage::info(format!("{} unchanged", param)),
            Err(e) => StatusMessage::error(e.to_string()),
        }
    }

    fn apply(&mut self) -> StatusMessage {
        let changes = self.params.take_changes();
        let snapshot = self.params.snapshot();
        match self.engine.apply(&changes, &snapshot, &self.source) {
            Ok(report) => {
                if let Some(defaults) = &report.normalization_defaults {
                    self.params.write_back_normalization(defaults);
                }
                if report.is_noop() {
                    StatusMessage::info("Up to date")
                } else {
                    let stages: Vec<&str> = report.executed.iter().map(|s| s.name()).collect();
                    info!("Applied {}", stages.join(", "));
                    StatusMessage::info(format!("Updated {}", stages.join(", ")))
                }
            }
            Err(e) if e.is_empty_selection() => {
                StatusMessage::error(format!("Empty selection, adjust the bounds ({})", e))
            }
            Err(e) => StatusMessage::error(e.to_string()),
        }
    }

    fn add_pick(&mut self, time: NaiveDateTime, distance: f64) -> StatusMessage {
        match self.picks.add(time, distance, self.active_phase.clone()) {
            Ok(index) => StatusMessage::info(format!("Added {} pick #{}", self.active_phase, index)),
            Err(e) => StatusMessage::error(e.to_string()),
        }
    }

    fn delete_picks(&mut self, selection: &PickSelection) -> StatusMessage {
        match self.picks.delete_selection(selection) {
            Ok(removed) => StatusMessage::info(format!("Deleted {} picks", removed)),
            Err(e) => StatusMessage::error(e.to_string()),
        }
    }

    fn save_picks(&mut self, path: &Path) -> StatusMessage {
        match self.picks.save(path) {
            Ok(()) => StatusMessage::info(format!(
                "Saved {} picks to {}",
                self.picks.len(),
                path.display()
            )),
            Err(e) => StatusMessage::error(format!("Saving picks failed: {}", e)),
        }
    }

    fn load_picks(&mut self, path: &Path) -> StatusMessage {
        match self.picks.load(path, &self.phases) {
            Ok(count) => {
                StatusMessage::info(format!("Loaded {} picks from {}", count, path.display()))
            }
            Err(e) => StatusMessage::error(format!("Loading picks failed: {}", e)),
        }
    }

    fn select_phase(&mut self, label: String) -> StatusMessage {
        if !self.phases.contains(&label) {
            return StatusMessage::error(format!("unknown phase '{}'", label));
        }
        self.active_phase = label;
        StatusMessage::info(format!("Picking {}", self.active_phase))
    }

    fn set_phase_color(&mut self, label: &str, color: Rgb) -> StatusMessage {
        match self.phases.set_color(label, color) {
            Ok(()) => StatusMessage::info(format!("{} drawn in {}", label, color)),
            Err(e) => StatusMessage::error(e.to_string()),
        }
    }

    /// Outcome of the last action
    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// Last rendered image
    pub fn image(&self) -> Option<&NormalizedImage> {
        self.engine.image()
    }

    /// Parameter values as currently entered
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// The pipeline and its cache
    pub fn engine(&self) -> &PipelineEngine {
        &self.engine
    }

    /// How often `stage` has run
    pub fn run_count(&self, stage: Stage) -> usize {
        self.engine.run_count(stage)
    }

    /// Current picks
    pub fn picks(&self) -> &PickStore {
        &self.picks
    }

    /// Configured phases
    pub fn phases(&self) -> &PhaseRegistry {
        &self.phases
    }

    /// Phase new picks get
    pub fn active_phase(&self) -> &str {
        &self.active_phase
    }

    /// Rendered image size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }

    /// Pick marker size in pixels
    pub fn marker_size(&self) -> i64 {
        match self.params.get(Param::MarkerSize) {
            ParamValue::Integer(size) => *size,
            _ => DEFAULT_MARKER_SIZE,
        }
    }

    /// Source codes offered for selection
    pub fn codes(&self) -> Vec<String> {
        self.source.codes()
    }

    /// The signal source
    pub fn source(&self) -> &S {
        &self.source
    }
}
