//! Editor settings management
//!
//! This module provides settings persistence, loading, and updating
//! for the editor. Every field has a default, so partial or older settings
//! files still load.

use crate::Result;
use doc_model::OrderingStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file name inside the config directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Main editor settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Undo history settings
    pub history: HistorySettings,
    /// Shape ordering for listing and saving
    pub ordering: OrderingSettings,
    /// Log output settings
    pub logging: LoggingSettings,
}

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable commands per window
    pub depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { depth: 100 }
    }
}

/// Shape ordering settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderingSettings {
    pub strategy: OrderingStrategy,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Settings manager for loading, saving, and updating editor settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: EditorSettings,
}

impl SettingsManager {
    /// Create a settings manager for the given config directory
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: config_dir.as_ref().join(SETTINGS_FILE_NAME),
            current: EditorSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    /// or cannot be parsed
    pub fn load(&mut self) -> Result<&EditorSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<EditorSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                    self.current = EditorSettings::default();
                }
            }
        } else {
            self.current = EditorSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &EditorSettings {
        &self.current
    }

    /// Update only the history depth
    pub fn set_history_depth(&mut self, depth: usize) -> Result<()> {
        self.current.history.depth = depth;
        self.save()
    }

    /// Update only the ordering strategy
    pub fn set_ordering(&mut self, strategy: OrderingStrategy) -> Result<()> {
        self.current.ordering.strategy = strategy;
        self.save()
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&EditorSettings> {
        self.current = EditorSettings::default();
        self.save()?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.history.depth, 100);
        assert_eq!(settings.ordering.strategy, OrderingStrategy::Creation);
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: EditorSettings =
            serde_json::from_str(r#"{ "ordering": { "strategy": "spatial" } }"#).unwrap();
        assert_eq!(settings.ordering.strategy, OrderingStrategy::Spatial);
        assert_eq!(settings.history.depth, 100);
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn test_settings_manager_load_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        // Load should return defaults when no file exists
        let settings = manager.load().unwrap();
        assert_eq!(settings, &EditorSettings::default());

        manager.set_history_depth(12).unwrap();
        manager.set_ordering(OrderingStrategy::Spatial).unwrap();

        let mut manager2 = SettingsManager::new(temp_dir.path());
        let loaded = manager2.load().unwrap();
        assert_eq!(loaded.history.depth, 12);
        assert_eq!(loaded.ordering.strategy, OrderingStrategy::Spatial);
    }

    #[test]
    fn test_unparseable_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "{ not json").unwrap();

        let mut manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.load().unwrap(), &EditorSettings::default());
    }

    #[test]
    fn test_reset() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());
        manager.set_history_depth(3).unwrap();
        let settings = manager.reset().unwrap();
        assert_eq!(settings.history.depth, 100);
    }
}
