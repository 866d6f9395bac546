// Copyright 2025 Cowboy AI, LLC.

//! Composer configuration

use crate::errors::{ComposerError, ComposerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`crate::Composer`]
///
/// Missing keys take their default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Label attached to the composer's log events
    pub name: String,
    /// Return the cached open session when a stamp key is opened again
    pub reuse_sessions: bool,
    /// Drop sessions whose commit/cancel failed during a sweep instead of
    /// keeping them cached for a retry
    pub evict_on_sweep_failure: bool,
    /// Log a warning for every session still open when the composer is dropped
    pub warn_on_unfinished_sessions: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            name: "composer".to_string(),
            reuse_sessions: true,
            evict_on_sweep_failure: false,
            warn_on_unfinished_sessions: true,
        }
    }
}

impl ComposerConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> ComposerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ComposerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ComposerError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }
}
