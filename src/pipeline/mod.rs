//! # Pipeline Module
//!
//! Staged recomputation from a signal source to a normalized image:
//!
//! ```text
//! Load (selection) -> Process (processing.space, processing.time) -> Normalize (normalization)
//! ```
//!
//! Each parameter group feeds exactly one minimal [`Stage`]; changing it marks
//! that stage and all later ones dirty ([`DirtySet`]). On apply the
//! [`PipelineEngine`] walks the stages in order, runs the dirty ones and keeps
//! the last good output of each.
//!
//! Normalization auto-ranges missing limits and reports the resolved values in
//! [`ApplyReport::normalization_defaults`] so the caller can display them.

mod engine;
mod error;
mod normalize;
mod stage;


pub use engine::{ApplyReport, PipelineCache, PipelineEngine};
pub use error::PipelineError;
pub use normalize::{
    nice_ceiling, normalize, resolve_limits, ImagePlacement, NormalizedImage, SymLogNorm,
    ViewRange,
};
pub use stage::{DirtySet, Stage};
