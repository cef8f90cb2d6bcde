use chrono::NaiveDateTime;
use log::info;
use std::collections::BTreeSet;
use std::path::Path;

use super::io::{read_picks, write_picks};
use super::{PersistenceError, Pick, PickStatus};
use crate::phases::PhaseRegistry;

/// Pick indices captured against one state of a [`PickStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickSelection {
    indices: BTreeSet<usize>,
    generation: u64,
}

impl PickSelection {
    /// Selected positions
    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    /// Store generation the indices refer to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Ordered collection of picks.
///
/// A pick is identified by its position only. Every mutation bumps a
/// generation counter so index sets captured earlier can be recognized as
/// stale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickStore {
    picks: Vec<Pick>,
    generation: u64,
}

impl PickStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an active pick, returning its index. Duplicates are allowed.
    ///
    /// The distance must be finite so the pick survives a save and load.
    pub fn add(
        &mut self,
        time: NaiveDateTime,
        distance: f64,
        phase: impl Into<String>,
    ) -> Result<usize, PersistenceError> {
        if !distance.is_finite() {
            return Err(PersistenceError::NonFiniteDistance(distance));
        }
        self.picks.push(Pick {
            time,
            distance,
            phase: phase.into(),
            status: PickStatus::Active,
        });
        self.bump();
        Ok(self.picks.len() - 1)
    }

    /// Remove the picks at `indices` (current order), returning how many went.
    ///
    /// Indices past the end are ignored.
    pub fn delete_where(&mut self, indices: &BTreeSet<usize>) -> usize {
        let before = self.picks.len();
        let mut position = 0;
        self.picks.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        let removed = before - self.picks.len();
        if removed > 0 {
            self.bump();
        }
        removed
    }

    /// Capture `indices` against the current state
    pub fn capture_selection(&self, indices: impl IntoIterator<Item = usize>) -> PickSelection {
        PickSelection {
            indices: indices.into_iter().collect(),
            generation: self.generation,
        }
    }

    /// Delete a captured selection if the store has not changed since
    pub fn delete_selection(&mut self, selection: &PickSelection) -> Result<usize, PersistenceError> {
        if selection.generation != self.generation {
            return Err(PersistenceError::StaleSelection {
                captured: selection.generation,
                current: self.generation,
            });
        }
        Ok(self.delete_where(&selection.indices))
    }

    /// Remove every pick
    pub fn reset(&mut self) {
        self.picks.clear();
        self.bump();
    }

    /// Finish a drawing stroke of `phase`.
    ///
    /// Inactive picks of `phase` lying within the distance span of the active
    /// picks are replaced by them, then every pick becomes inactive. Returns
    /// the number of picks removed.
    pub fn commit_stroke(&mut self, phase: &str) -> usize {
        let span = self
            .picks
            .iter()
            .filter(|p| p.status == PickStatus::Active)
            .fold(None, |span: Option<(f64, f64)>, p| match span {
                Some((lo, hi)) => Some((lo.min(p.distance), hi.max(p.distance))),
                None => Some((p.distance, p.distance)),
            });

        let before = self.picks.len();
        if let Some((lo, hi)) = span {
            self.picks.retain(|p| {
                !(p.status == PickStatus::Inactive
                    && p.phase == phase
                    && lo <= p.distance
                    && p.distance <= hi)
            });
        }
        for pick in &mut self.picks {
            pick.status = PickStatus::Inactive;
        }
        self.bump();
        before - self.picks.len()
    }

    /// Write every pick to `path` as CSV sorted by time
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        write_picks(path, &self.picks)?;
        info!("Saved {} picks to {}", self.picks.len(), path.display());
        Ok(())
    }

    /// Replace the whole collection with the picks stored at `path`.
    ///
    /// Every row must parse and name a phase of `phases`; otherwise the
    /// store is left as it was. Returns the number of picks loaded.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        phases: &PhaseRegistry,
    ) -> Result<usize, PersistenceError> {
        let path = path.as_ref();
        let picks = read_picks(path, phases)?;
        info!("Loaded {} picks from {}", picks.len(), path.display());
        self.picks = picks;
        self.bump();
        Ok(self.picks.len())
    }

    /// Pick at `index`
    pub fn get(&self, index: usize) -> Option<&Pick> {
        self.picks.get(index)
    }

    /// Picks in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Pick> {
        self.picks.iter()
    }

    /// All picks as a slice
    pub fn as_slice(&self) -> &[Pick] {
        &self.picks
    }

    /// Number of picks
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// True when the store holds no pick
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Mutation counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a PickStore {
    type Item = &'a Pick;
    type IntoIter = std::slice::Iter<'a, Pick>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
