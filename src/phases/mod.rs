//! # Phase Module
//!
//! The [`PhaseRegistry`] is the ordered list of pick categories ("phases"),
//! each with a display color. It is built once at startup from two parallel
//! lists; afterwards only colors change.
//!
//! When the lists disagree in length every phase gets [`DEFAULT_PHASE_COLOR`]
//! and a [`ConfigMismatch`] warning is recorded instead of failing.
//!
//! ```rust
//! use xpick::phases::{PhaseRegistry, DEFAULT_PHASE_COLOR};
//!
//! let registry = PhaseRegistry::from_strings(&["Pp", "Ps", "Ss"], &["#BF0DFF"])?;
//! assert_eq!(registry.warnings().len(), 1);
//! assert!(registry.iter().all(|p| p.color == DEFAULT_PHASE_COLOR));
//! # Ok::<(), xpick::phases::PhaseError>(())
//! ```

mod color;
mod error;

#[cfg(test)]
mod tests;

pub use color::Rgb;
pub use error::{ConfigMismatch, PhaseError};

use log::warn;
use std::collections::HashSet;

/// Color of every phase when the configured colors cannot be paired up
pub const DEFAULT_PHASE_COLOR: Rgb = Rgb::new(0x7F, 0x0D, 0xFF);

/// One pick category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDefinition {
    /// Unique label, also written to pick files
    pub label: String,
    /// Display color
    pub color: Rgb,
}

/// Ordered, label-unique list of phases
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseRegistry {
    phases: Vec<PhaseDefinition>,
    warnings: Vec<ConfigMismatch>,
}

impl PhaseRegistry {
    /// Build the registry from parallel label and color lists
    pub fn new(labels: Vec<String>, colors: Vec<Rgb>) -> Result<Self, PhaseError> {
        if labels.is_empty() {
            return Err(PhaseError::NoLabels);
        }
        let mut seen = HashSet::new();
        for label in &labels {
            if label.trim().is_empty() {
                return Err(PhaseError::EmptyLabel);
            }
            if !seen.insert(label.as_str()) {
                return Err(PhaseError::DuplicateLabel(label.clone()));
            }
        }

        let mut warnings = Vec::new();
        let colors = if colors.len() == labels.len() {
            colors
        } else {
            let mismatch = ConfigMismatch {
                labels: labels.len(),
                colors: colors.len(),
            };
            warn!("{}", mismatch);
            warnings.push(mismatch);
            vec![DEFAULT_PHASE_COLOR; labels.len()]
        };

        let phases = labels
            .into_iter()
            .zip(colors)
            .map(|(label, color)| PhaseDefinition { label, color })
            .collect();
        Ok(Self { phases, warnings })
    }

    /// Build the registry from textual labels and `#RRGGBB` colors
    pub fn from_strings<L, C>(labels: &[L], colors: &[C]) -> Result<Self, PhaseError>
    where
        L: AsRef<str>,
        C: AsRef<str>,
    {
        let labels = labels.iter().map(|l| l.as_ref().trim().to_string()).collect();
        let colors = colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Rgb>, _>>()?;
        Self::new(labels, colors)
    }

    /// Labels in configured order
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.phases.iter().map(|p| p.label.as_str())
    }

    /// Phase carrying `label`
    pub fn get(&self, label: &str) -> Option<&PhaseDefinition> {
        self.phases.iter().find(|p| p.label == label)
    }

    /// Color of `label`
    pub fn color(&self, label: &str) -> Option<Rgb> {
        self.get(label).map(|p| p.color)
    }

    /// Whether `label` is a configured phase
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Position of `label`
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.label == label)
    }

    /// Change the color of one phase. Labels and their order never change.
    pub fn set_color(&mut self, label: &str, color: Rgb) -> Result<(), PhaseError> {
        let phase = self
            .phases
            .iter_mut()
            .find(|p| p.label == label)
            .ok_or_else(|| PhaseError::UnknownLabel(label.to_string()))?;
        phase.color = color;
        Ok(())
    }

    /// Phases in configured order
    pub fn iter(&self) -> std::slice::Iter<'_, PhaseDefinition> {
        self.phases.iter()
    }

    /// The first configured phase
    pub fn first(&self) -> &PhaseDefinition {
        // `new` rejects an empty label list
        &self.phases[0]
    }

    /// Number of phases
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false, a registry holds at least one phase
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Configuration warnings recorded while building
    pub fn warnings(&self) -> &[ConfigMismatch] {
        &self.warnings
    }
}

impl<'a> IntoIterator for &'a PhaseRegistry {
    type Item = &'a PhaseDefinition;
    type IntoIter = std::slice::Iter<'a, PhaseDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
