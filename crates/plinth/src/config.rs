//! Presenter configuration.
//!
//! A [`PresenterConfig`] tunes how a [`DualSurfaceDisplay`] picks its
//! foreground surface. It is usually loaded from a TOML file:
//!
//! ```toml
//! breakpoint = 720.0
//! initial_mode = "row"
//!
//! [policy]
//! compact = "row"
//! regular = "grid"
//! ```
//!
//! Every key is optional; missing keys take their defaults.
//!
//! [`DualSurfaceDisplay`]: crate::widget::DualSurfaceDisplay

use std::path::{Path, PathBuf};

use plinth_core::logging::targets;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widget::{ForegroundMode, ForegroundPolicy};

/// Width, in points, below which the horizontal size class is compact.
pub const DEFAULT_BREAKPOINT: f32 = 600.0;

/// Errors produced while loading a [`PresenterConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("invalid presenter config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("cannot serialize presenter config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file could not be read.
    #[error("cannot read presenter config '{}': {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The breakpoint is not a finite, positive width.
    #[error("breakpoint must be a finite positive width, got {0}")]
    InvalidBreakpoint(f32),
}

/// Foreground selection settings for a dual-surface display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Width below which the size class is compact.
    pub breakpoint: f32,
    /// Mode to start in when both surfaces are attached, overriding the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_mode: Option<ForegroundMode>,
    /// Size class to foreground mode mapping.
    pub policy: ForegroundPolicy,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            initial_mode: None,
            policy: ForegroundPolicy::default(),
        }
    }
}

impl PresenterConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).inspect_err(|err| {
            tracing::error!(target: targets::CONFIG, path = %path.display(), %err, "rejected presenter config");
        })?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded presenter config");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Checks that the breakpoint is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint.is_finite() && self.breakpoint > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidBreakpoint(self.breakpoint))
        }
    }
}
