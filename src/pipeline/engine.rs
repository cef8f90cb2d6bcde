use log::{debug, info};

use super::normalize::{normalize, NormalizedImage};
use super::{DirtySet, PipelineError, Stage};
use crate::params::{ChangeSet, NormalizationParameters, ParameterSnapshot};
use crate::signal::{Signal, SignalSource};
use crate::transform;

/// Last successfully computed value of each stage
#[derive(Debug, Clone, Default)]
pub struct PipelineCache {
    raw: Option<Signal>,
    processed: Option<Signal>,
    normalized: Option<NormalizedImage>,
}

/// What one apply did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Stages that ran, in order
    pub executed: Vec<Stage>,
    /// Limits filled in by auto-ranging, to be shown as the new defaults
    pub normalization_defaults: Option<NormalizationParameters>,
}

impl ApplyReport {
    /// True when every stage was already current
    pub fn is_noop(&self) -> bool {
        self.executed.is_empty()
    }
}

/// Runs Load, Process and Normalize, skipping stages that are current.
///
/// The engine owns its cache exclusively. A stage's dirty bit is cleared only
/// once the stage succeeded; a failure leaves every cached value as it was so
/// the previous image stays on screen and the next apply retries.
#[derive(Debug, Clone)]
pub struct PipelineEngine {
    cache: PipelineCache,
    dirty: DirtySet,
    runs: [usize; 3],
}

impl Default for PipelineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineEngine {
    /// Engine with an empty cache and every stage dirty
    pub fn new() -> Self {
        Self {
            cache: PipelineCache::default(),
            dirty: DirtySet::all(),
            runs: [0; 3],
        }
    }

    /// Mark the stages fed by the changed groups dirty
    pub fn invalidate(&mut self, changes: &ChangeSet) {
        for group in changes.iter() {
            self.dirty.invalidate(group);
        }
    }

    /// Record `changes` then bring every stage up to date.
    ///
    /// Stops at the first failing stage; later stages do not run.
    pub fn apply<S>(
        &mut self,
        changes: &ChangeSet,
        snapshot: &ParameterSnapshot,
        source: &S,
    ) -> Result<ApplyReport, PipelineError>
    where
        S: SignalSource + ?Sized,
    {
        self.invalidate(changes);

        let mut report = ApplyReport::default();
        for stage in Stage::ALL {
            if !self.dirty.is_dirty(stage) {
                debug!("Stage {} is current, skipping", stage);
                continue;
            }
            self.runs[stage as usize] += 1;
            match stage {
                Stage::Load => self.load(snapshot, source)?,
                Stage::Process => self.process(snapshot)?,
                Stage::Normalize => {
                    report.normalization_defaults = self.normalize(snapshot)?;
                }
            }
            self.dirty.clear(stage);
            report.executed.push(stage);
        }
        Ok(report)
    }

    fn load<S>(&mut self, snapshot: &ParameterSnapshot, source: &S) -> Result<(), PipelineError>
    where
        S: SignalSource + ?Sized,
    {
        let selection = snapshot
            .selection()
            .map_err(PipelineError::parameter(Stage::Load))?;
        info!("Loading '{}'", selection.source_id);
        let signal = source.select(&selection.source_id, &selection.bounds())?;
        info!("Loaded {:?} samples", signal.shape());
        self.cache.raw = Some(signal);
        Ok(())
    }

    fn process(&mut self, snapshot: &ParameterSnapshot) -> Result<(), PipelineError> {
        let params = snapshot
            .processing()
            .map_err(PipelineError::parameter(Stage::Process))?;
        let raw = self.cache.raw.as_ref().ok_or(PipelineError::MissingInput {
            stage: Stage::Process,
            upstream: Stage::Load,
        })?;
        info!("Processing {:?} samples", raw.shape());
        let processed =
            transform::process(raw, &params).map_err(PipelineError::parameter(Stage::Process))?;
        info!("Processed into {:?} samples", processed.shape());
        self.cache.processed = Some(processed);
        Ok(())
    }

    /// Returns the resolved limits when auto-ranging filled one in
    fn normalize(
        &mut self,
        snapshot: &ParameterSnapshot,
    ) -> Result<Option<NormalizationParameters>, PipelineError> {
        let params = snapshot
            .normalization()
            .map_err(PipelineError::parameter(Stage::Normalize))?;
        let processed = self
            .cache
            .processed
            .as_ref()
            .ok_or(PipelineError::MissingInput {
                stage: Stage::Normalize,
                upstream: Stage::Process,
            })?;
        let (image, resolved) = normalize(processed, &params);
        info!(
            "Normalized with value limit {:e} and linear threshold {:e}",
            image.value_limit(),
            image.linear_threshold()
        );
        self.cache.normalized = Some(image);
        Ok((resolved != params).then_some(resolved))
    }

    /// Last rendered image
    pub fn image(&self) -> Option<&NormalizedImage> {
        self.cache.normalized.as_ref()
    }

    /// Last processed signal
    pub fn processed(&self) -> Option<&Signal> {
        self.cache.processed.as_ref()
    }

    /// Last loaded signal
    pub fn raw(&self) -> Option<&Signal> {
        self.cache.raw.as_ref()
    }

    /// Current dirty bits
    pub fn dirty(&self) -> &DirtySet {
        &self.dirty
    }

    /// How often `stage` has been executed, failed attempts included
    pub fn run_count(&self, stage: Stage) -> usize {
        self.runs[stage as usize]
    }
}
