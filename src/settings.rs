//! Application settings persistence
//!
//! Settings are stored in a JSON file at the platform-appropriate config location:
//! - macOS: ~/Library/Application Support/pixelcat/settings.json
//! - Windows: %APPDATA%/pixelcat/settings.json
//! - Linux: ~/.config/pixelcat/settings.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::formats::TargetFormat;

/// Maximum number of recent files to track
const MAX_RECENT_FILES: usize = 10;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Format preselected for batch jobs
    pub default_format: TargetFormat,

    /// Output directory of the last batch job
    pub last_output_dir: Option<PathBuf>,

    /// Whether `last_output_dir` is updated after each batch job
    pub remember_output_dir: bool,

    /// List of recently opened files (most recent first)
    pub recent_files: Vec<PathBuf>,

    /// Whether anything changed since load or the last save
    #[serde(skip)]
    modified: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_format: TargetFormat::Png,
            last_output_dir: None,
            remember_output_dir: true,
            recent_files: Vec::new(),
            modified: false,
        }
    }
}

impl AppSettings {
    /// Get the path to the settings file
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("pixelcat");
            path.push("settings.json");
            path
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            log::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read settings file: {}", e);
                }
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&mut self) {
        let Some(path) = Self::settings_path() else {
            log::warn!("Could not determine config directory, settings not saved");
            return;
        };
        self.save_to(&path);
    }

    /// Whether the settings changed since they were loaded or last saved
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Save settings to a specific file
    pub fn save_to(&mut self, path: &Path) {
        // Ensure the config directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(path, contents) {
                    log::warn!("Failed to write settings file: {}", e);
                } else {
                    log::info!("Saved settings to {}", path.display());
                    self.modified = false;
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Add a file to the recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        if self.recent_files.first() == Some(&path) {
            return;
        }

        // Remove if already in list (to move to front)
        self.recent_files.retain(|p| p != &path);

        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
        self.modified = true;
    }

    /// Get the recent files list
    pub fn recent_files(&self) -> &[PathBuf] {
        &self.recent_files
    }

    /// Clear the recent files list
    pub fn clear_recent_files(&mut self) {
        if !self.recent_files.is_empty() {
            self.recent_files.clear();
            self.modified = true;
        }
    }

    /// Record the output directory of a finished batch job
    pub fn record_output_dir(&mut self, dir: &Path) {
        if self.remember_output_dir && self.last_output_dir.as_deref() != Some(dir) {
            self.last_output_dir = Some(dir.to_path_buf());
            self.modified = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_format, TargetFormat::Png);
        assert!(settings.last_output_dir.is_none());
        assert!(settings.remember_output_dir);
        assert!(settings.recent_files.is_empty());
    }

    #[test]
    fn test_add_recent_file_moves_to_front() {
        let mut settings = AppSettings::default();

        settings.add_recent_file(PathBuf::from("/path/to/one.pixil"));
        settings.add_recent_file(PathBuf::from("/path/to/two.png"));
        settings.add_recent_file(PathBuf::from("/path/to/one.pixil"));

        assert_eq!(
            settings.recent_files(),
            &[
                PathBuf::from("/path/to/one.pixil"),
                PathBuf::from("/path/to/two.png"),
            ]
        );
    }

    #[test]
    fn test_recent_files_max_limit() {
        let mut settings = AppSettings::default();

        for i in 0..15 {
            settings.add_recent_file(PathBuf::from(format!("/path/to/file{}.png", i)));
        }

        assert_eq!(settings.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(settings.recent_files[0], PathBuf::from("/path/to/file14.png"));

        settings.clear_recent_files();
        assert!(settings.recent_files.is_empty());
    }

    #[test]
    fn test_record_output_dir() {
        let mut settings = AppSettings::default();
        settings.record_output_dir(Path::new("/out/a"));
        assert_eq!(settings.last_output_dir, Some(PathBuf::from("/out/a")));

        settings.remember_output_dir = false;
        settings.record_output_dir(Path::new("/out/b"));
        assert_eq!(settings.last_output_dir, Some(PathBuf::from("/out/a")));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.default_format = TargetFormat::Ico;
        settings.add_recent_file(PathBuf::from("/art/cat.pixil"));
        settings.save_to(&path);

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded.default_format, TargetFormat::Ico);
        assert_eq!(loaded.recent_files, vec![PathBuf::from("/art/cat.pixil")]);
    }

    #[test]
    fn test_modified_only_on_real_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.add_recent_file(PathBuf::from("/art/cat.pixil"));
        settings.record_output_dir(Path::new("/out"));
        assert!(settings.is_modified());
        settings.save_to(&path);
        assert!(!settings.is_modified());

        let mut loaded = AppSettings::load_from(&path);
        assert!(!loaded.is_modified());

        // Reopening the newest file and reusing the same output dir change nothing
        loaded.add_recent_file(PathBuf::from("/art/cat.pixil"));
        loaded.record_output_dir(Path::new("/out"));
        assert!(!loaded.is_modified());

        loaded.add_recent_file(PathBuf::from("/art/dog.png"));
        assert!(loaded.is_modified());
    }

    #[test]
    fn test_partial_and_invalid_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();

        let partial = dir.path().join("partial.json");
        std::fs::write(&partial, r#"{"default_format": "JPG"}"#).unwrap();
        let loaded = AppSettings::load_from(&partial);
        assert_eq!(loaded.default_format, TargetFormat::Jpg);
        assert!(loaded.remember_output_dir);

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, "not json").unwrap();
        assert_eq!(AppSettings::load_from(&invalid).default_format, TargetFormat::Png);

        let missing = AppSettings::load_from(&dir.path().join("missing.json"));
        assert!(missing.recent_files.is_empty());
    }
}
