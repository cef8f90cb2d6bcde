//! TOML startup configuration.
//!
//! Every field is optional; command-line flags override the file:
//!
//! ```toml
//! # xpick.toml
//! sources = ["stationA.channel1", "stationB.channel1"]
//!
//! [phases]
//! labels = ["Pp", "Ps", "Ss"]
//! colors = ["#7F0DFF", "#BF0DFF", "#FF00FF"]
//!
//! [image]
//! width = 1080
//! height = 720
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::phases::{PhaseError, PhaseRegistry};

/// Phase labels used when none are configured
pub const DEFAULT_PHASE_LABELS: [&str; 2] = ["P", "S"];

/// Image width in pixels used when none is configured
pub const DEFAULT_IMAGE_WIDTH: u32 = 1080;

/// Image height in pixels used when none is configured
pub const DEFAULT_IMAGE_HEIGHT: u32 = 720;

/// Errors while reading the startup configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Phase labels or colors are invalid
    #[error("invalid phase configuration: {0}")]
    Phase(#[from] PhaseError),

    /// Zero-sized image
    #[error("image size must be positive, got {width}x{height}")]
    InvalidImageSize {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },
}

/// Root of `xpick.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Source identifiers offered for selection
    #[serde(default)]
    pub sources: Vec<String>,

    /// Pick categories
    #[serde(default)]
    pub phases: PhasesConfig,

    /// Rendered image size
    #[serde(default)]
    pub image: ImageConfig,
}

/// `[phases]` table: two parallel lists
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhasesConfig {
    /// Ordered, unique labels
    pub labels: Option<Vec<String>>,

    /// One `#RRGGBB` color per label
    #[serde(default)]
    pub colors: Vec<String>,
}

/// `[image]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
}

impl SessionConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Configured labels, or the defaults
    pub fn phase_labels(&self) -> Vec<String> {
        match &self.phases.labels {
            Some(labels) => labels.clone(),
            None => DEFAULT_PHASE_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Build the phase registry. A label/color count mismatch is a warning
    /// recorded by the registry, not an error.
    pub fn build_phases(&self) -> Result<PhaseRegistry, ConfigError> {
        Ok(PhaseRegistry::from_strings(
            &self.phase_labels(),
            &self.phases.colors,
        )?)
    }

    /// `(width, height)` of the rendered image
    pub fn image_size(&self) -> Result<(u32, u32), ConfigError> {
        let width = self.image.width.unwrap_or(DEFAULT_IMAGE_WIDTH);
        let height = self.image.height.unwrap_or(DEFAULT_IMAGE_HEIGHT);
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidImageSize { width, height });
        }
        Ok((width, height))
    }

    /// Replace the phase lists with command-line values where given
    pub fn override_phases(&mut self, labels: Option<&str>, colors: Option<&str>) {
        if let Some(labels) = labels {
            self.phases.labels = Some(parse_list(labels));
        }
        if let Some(colors) = colors {
            self.phases.colors = parse_list(colors);
        }
    }

    /// Replace the image size with command-line values where given
    pub fn override_image(&mut self, width: Option<u32>, height: Option<u32>) {
        self.image.width = width.or(self.image.width);
        self.image.height = height.or(self.image.height);
    }
}

/// Split a comma-separated list, trimming items and dropping empty ones
pub fn parse_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
