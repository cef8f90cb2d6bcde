//! # Pick Module
//!
//! A [`Pick`] is an annotation point placed on the image: a time, a distance
//! and a phase label. The [`PickStore`] keeps them in creation order; that
//! order is their only identity.
//!
//! Picks drawn during the current stroke are [`PickStatus::Active`]. The
//! status is display state only; pick files carry `time,distance,phase`.
//!
//! ```rust,no_run
//! use xpick::phases::PhaseRegistry;
//! use xpick::picks::PickStore;
//! use xpick::signal::synthetic::demo_start;
//!
//! let phases = PhaseRegistry::from_strings(&["P", "S"], &["#7F0DFF", "#FF00FF"])?;
//! let mut store = PickStore::new();
//! store.add(demo_start(), 20_000.0, "P")?;
//! store.commit_stroke("P");
//! store.save("picks.csv")?;
//!
//! let mut reloaded = PickStore::new();
//! reloaded.load("picks.csv", &phases)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod io;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::{PickSelection, PickStore};

use chrono::NaiveDateTime;
use std::fmt;

/// Whether a pick belongs to the stroke being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickStatus {
    /// Placed during the current stroke
    Active,
    /// Committed or loaded
    Inactive,
}

impl fmt::Display for PickStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickStatus::Active => f.write_str("active"),
            PickStatus::Inactive => f.write_str("inactive"),
        }
    }
}

/// Labeled annotation point
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    /// Time coordinate
    pub time: NaiveDateTime,
    /// Distance coordinate
    pub distance: f64,
    /// Phase label
    pub phase: String,
    /// Display status, never persisted
    pub status: PickStatus,
}
