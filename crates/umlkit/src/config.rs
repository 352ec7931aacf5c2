//! Configuration types for UMLKit.
//!
//! This module provides configuration structures that control where
//! diagrams are stored and how they are presented. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining storage and display settings.
//! - [`StorageConfig`] - Where saved diagrams live and how they are written.
//! - [`DisplayConfig`] - Presentation options for front ends.
//!
//! # Example
//!
//! ```
//! # use umlkit::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.storage().pretty());
//! assert!(!config.display().sort_classes());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration combining storage and display settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration section.
    #[serde(default)]
    storage: StorageConfig,

    /// Display configuration section.
    #[serde(default)]
    display: DisplayConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified storage and display configurations.
    ///
    /// # Arguments
    ///
    /// * `storage` - Where and how diagrams are saved.
    /// * `display` - Presentation options.
    pub fn new(storage: StorageConfig, display: DisplayConfig) -> Self {
        Self { storage, display }
    }

    /// Returns the storage configuration.
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Returns the display configuration.
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Replaces the storage directory, keeping the other storage settings.
    pub fn with_storage_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.storage.directory = directory.into();
        self
    }
}

/// Settings for the directory that holds saved diagrams.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding saved diagrams and the saved-file catalog.
    #[serde(default = "default_directory")]
    directory: PathBuf,

    /// Whether saved JSON is pretty-printed.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

impl StorageConfig {
    /// Creates a new [`StorageConfig`].
    ///
    /// # Arguments
    ///
    /// * `directory` - Directory for saved diagrams.
    /// * `pretty` - Pretty-print saved JSON.
    pub fn new(directory: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            directory: directory.into(),
            pretty,
        }
    }

    /// Returns the storage directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns whether saved JSON is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            pretty: default_pretty(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_pretty() -> bool {
    true
}

/// Presentation options for front ends.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DisplayConfig {
    /// List classes sorted by name instead of in creation order.
    #[serde(default)]
    sort_classes: bool,
}

impl DisplayConfig {
    /// Creates a new [`DisplayConfig`].
    pub fn new(sort_classes: bool) -> Self {
        Self { sort_classes }
    }

    /// Returns whether class listings are sorted by name.
    pub fn sort_classes(&self) -> bool {
        self.sort_classes
    }
}
