use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::STORAGE_KEY;
use crate::storage::{
    resolve_session_dir, DisabledStorage, FileSessionStorage, MemoryStorage, SessionStorage,
};

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per session under `session_dir`
    #[default]
    File,
    /// Lives only as long as the process
    Memory,
    /// Every access fails, like private browsing with storage blocked
    Disabled,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Empty means the per-login runtime directory
    #[serde(default)]
    pub session_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage: StorageSettings::default(),
        }
    }
}

impl Settings {
    pub fn load(settings_file: &str) -> Result<Self> {
        let path = Path::new(settings_file);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "settings file not found at '{}'",
                settings_file
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", settings_file))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", settings_file))?;

        if settings.storage_key.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "storage_key in '{}' must not be empty",
                settings_file
            ));
        }

        info!("Settings loaded from '{}'.", settings_file);
        Ok(settings)
    }

    /// Load `settings_file` when given, otherwise use built-in defaults.
    pub fn load_or_default(settings_file: Option<&str>) -> Result<Self> {
        match settings_file {
            Some(file) => Self::load(file),
            None => {
                debug!("No settings file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn session_dir(&self) -> PathBuf {
        resolve_session_dir(&self.storage.session_dir)
    }

    /// Build the configured storage backend for `session_id`.
    pub fn open_storage(&self, session_id: &str) -> Box<dyn SessionStorage> {
        match self.storage.backend {
            StorageBackend::File => {
                Box::new(FileSessionStorage::new(self.session_dir(), session_id))
            }
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
            StorageBackend::Disabled => Box::new(DisabledStorage),
        }
    }
}
