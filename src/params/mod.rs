//! # Parameter Module
//!
//! Every user-configurable input of the pipeline lives in the
//! [`ParameterStore`]. Inputs are grouped ([`ParamGroup`]); modifying any
//! parameter records its group in a [`ChangeSet`] that the pipeline consumes
//! to decide which stages to recompute.
//!
//! Numeric inputs are stored as entered and parsed only when the owning stage
//! runs, from an immutable [`ParameterSnapshot`]. A malformed entry therefore
//! fails that stage (and leaves it dirty) instead of being rejected at typing
//! time. Empty text always means "absent", never zero.
//!
//! ## Example
//!
//! ```rust
//! use xpick::params::{Param, ParamGroup, ParameterStore};
//!
//! let mut store = ParameterStore::new();
//! store.set_text(Param::SpaceDecimation, "16")?;
//! store.set_text(Param::StartDistance, "20_000.0")?;
//!
//! let changes = store.take_changes();
//! assert!(changes.contains(ParamGroup::SpaceProcessing));
//!
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.processing()?.space.decimation_factor, Some(16));
//! assert_eq!(snapshot.selection()?.start_distance, Some(20_000.0));
//! # Ok::<(), xpick::params::ParameterError>(())
//! ```

mod error;
mod group;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use error::ParameterError;
pub use group::{Param, ParamGroup, ParamKind};
pub use store::{
    ChangeSet, ParamValue, ParameterSnapshot, ParameterStore, DEFAULT_MARKER_SIZE,
    MARKER_SIZE_RANGE,
};
pub use types::{
    AxisProcessing, NormalizationParameters, Palette, ProcessingParameters, SelectionParameters,
};
