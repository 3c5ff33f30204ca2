// StudyFlow settings engine
// Loads and saves `Settings` as pretty JSON; single values are updated by dot path.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::Settings;

pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<Settings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &Settings;
    fn get_value(&self, key: &str) -> Result<Value, SettingsError>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &Path;
}

/// JSON-file backed settings.
pub struct SettingsEngine {
    config_path: PathBuf,
    settings: Settings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, else `settings.json` in the platform config dir.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path = path_override.unwrap_or_else(|| platform::get_config_dir().join("settings.json"));
        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    fn to_json(&self) -> Result<Value, SettingsError> {
        serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(format!("Failed to serialize settings: {}", e)))
    }
}

fn split_key(key: &str) -> Result<Vec<&str>, SettingsError> {
    let parts: Vec<&str> = key.split('.').collect();
    if key.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return Err(SettingsError::InvalidKey(format!("Invalid key '{}'", key)));
    }
    Ok(parts)
}

impl SettingsEngineTrait for SettingsEngine {
    /// Missing file yields defaults; a malformed one is an error and leaves
    /// the in-memory settings untouched.
    fn load(&mut self) -> Result<Settings, SettingsError> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no settings file, using defaults");
            self.settings = Settings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;
        self.settings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::SerializationError(format!("Failed to parse config file: {}", e)))?;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SettingsError::IoError(format!("Failed to create config directory: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(format!("Failed to serialize settings: {}", e)))?;
        fs::write(&self.config_path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Reads a section (`"focus"`) or a single value (`"focus.duration_minutes"`).
    fn get_value(&self, key: &str) -> Result<Value, SettingsError> {
        let parts = split_key(key)?;
        let json = self.to_json()?;
        let mut current = &json;
        for part in parts {
            current = current
                .get(part)
                .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        }
        Ok(current.clone())
    }

    /// Replaces the value at `key`, validates the result by deserializing it,
    /// then saves. Unknown keys are rejected; nothing changes on error.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let parts = split_key(key)?;
        let mut json = self.to_json()?;

        let (last, path) = match parts.split_last() {
            Some(split) => split,
            None => return Err(SettingsError::InvalidKey("Key cannot be empty".to_string())),
        };
        let mut current = &mut json;
        for part in path {
            current = current
                .get_mut(*part)
                .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
        }
        match current {
            Value::Object(map) if map.contains_key(*last) => {
                map.insert(last.to_string(), value);
            }
            _ => return Err(SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))),
        }

        let updated: Settings = serde_json::from_value(json)
            .map_err(|e| SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e)))?;
        self.settings = updated;
        tracing::info!(key, "setting updated");
        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = Settings::default();
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
