//! # xpick - Interactive Picking Engine for DAS Records
//!
//! `xpick` is the engine behind an interactive picking tool for distributed
//! acoustic sensing (DAS) data. An analyst selects a time/distance window of a
//! large 2-D strain-rate record, runs it through a configurable chain of
//! numerical transforms, looks at the result as a normalized image and places
//! labeled picks on it. The picks persist to CSV files.
//!
//! ## Key Features
//!
//! - **Staged Recomputation**: The pipeline runs Load, Process and Normalize in
//!   a fixed order and re-runs only the stages whose parameters changed.
//!
//! - **Last-Good-Value Cache**: A failing stage (empty selection, malformed
//!   input) never overwrites the previously displayed image.
//!
//! - **Deterministic Transforms**: Integration, zero-phase FIR decimation along
//!   distance, causal IIR decimation along time, sliding mean removal and
//!   highpass filtering are pure functions of their inputs.
//!
//! - **Pick Store**: Ordered annotation collection with bulk deletion by
//!   captured index sets and atomic CSV persistence.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xpick::params::Param;
//! use xpick::phases::PhaseRegistry;
//! use xpick::session::{Action, Session};
//! use xpick::signal::synthetic::demo_collection;
//!
//! let phases = PhaseRegistry::from_strings(&["P", "S"], &["#7F0DFF", "#FF00FF"])?;
//! let mut session = Session::new(demo_collection()?, phases);
//!
//! session.handle(Action::set_text(Param::SourceId, "stationA.channel1"));
//! session.handle(Action::set_text(Param::SpaceDecimation, "4"));
//! let status = session.handle(Action::Apply);
//! println!("{}", status);
//!
//! if let Some(image) = session.image() {
//!     println!("{:?}", image.placement());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`signal`]: Sample blocks, uniform axes and the signal source interface
//! - [`params`]: Parameter store, parameter groups and typed snapshots
//! - [`transform`]: Numeric transform library and the fixed processing order
//! - [`pipeline`]: Dependency table, dirty tracking and the pipeline engine
//! - [`phases`]: Phase registry (labels and display colors)
//! - [`picks`]: Pick store and CSV persistence
//! - [`session`]: Single-session controller dispatching user actions
//! - [`config`]: TOML startup configuration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod params;
pub mod phases;
pub mod picks;
pub mod pipeline;
pub mod session;
pub mod signal;
pub mod timefmt;
pub mod transform;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigError, SessionConfig};
    pub use crate::params::{
        NormalizationParameters, Palette, Param, ParamGroup, ParamValue, ParameterError,
        ParameterStore, ProcessingParameters, SelectionParameters,
    };
    pub use crate::phases::{PhaseDefinition, PhaseError, PhaseRegistry, Rgb};
    pub use crate::picks::{PersistenceError, Pick, PickSelection, PickStatus, PickStore};
    pub use crate::pipeline::{
        ApplyReport, ImagePlacement, NormalizedImage, PipelineEngine, PipelineError, Stage,
    };
    pub use crate::session::{Action, Session, StatusLevel, StatusMessage};
    pub use crate::signal::{DataArray, DataNode, Signal, SignalSource, SourceError};
}
