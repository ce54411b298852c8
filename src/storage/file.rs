use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{SessionStorage, StorageError, StorageResult};
use crate::common::SESSION_DIR_NAME;

/// Pick the directory session files live in.
///
/// A configured directory wins. Otherwise the per-login runtime directory is
/// used, which the OS clears at logout, falling back to the temp dir.
pub fn resolve_session_dir(configured: &str) -> PathBuf {
    if !configured.is_empty() {
        info!("Using session directory set in configuration: {}", configured);
        return PathBuf::from(configured);
    }

    let base = dirs::runtime_dir().unwrap_or_else(std::env::temp_dir);
    let dir = base.join(SESSION_DIR_NAME);
    debug!("Using default session directory: {}", dir.display());
    dir
}

/// Session storage kept in one JSON file per session id.
///
/// The file holds a flat object of string keys to string values and is
/// deleted once it holds no keys. Writes replace a damaged file instead of
/// failing on it.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: impl AsRef<Path>, session_id: &str) -> Self {
        let path = dir
            .as_ref()
            .join(format!("{}.json", sanitize_session_id(session_id)));
        debug!("Session storage file: {}", path.display());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop every key in this session.
    pub fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Unavailable(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&contents)
            .map_err(|e| StorageError::Corrupted(format!("{}: {}", self.path.display(), e)))
    }

    /// Like [`Self::load`], but a damaged file reads as empty so the next
    /// write overwrites it.
    fn load_for_write(&self) -> StorageResult<BTreeMap<String, String>> {
        match self.load() {
            Err(StorageError::Corrupted(reason)) => {
                warn!("Overwriting damaged session file ({})", reason);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if items.is_empty() {
            return self.clear();
        }

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir_exists(parent)?;

        let json = serde_json::to_string(items)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        debug!("Writing {} bytes to {}", json.len(), self.path.display());
        write_atomic(parent, &self.path, &json)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        match self.load() {
            Ok(mut items) => {
                if items.remove(key).is_some() {
                    self.save(&items)?;
                }
                Ok(())
            }
            Err(StorageError::Corrupted(reason)) => {
                warn!("Removing damaged session file ({})", reason);
                self.clear()
            }
            Err(e) => Err(e),
        }
    }
}

/// Write through a temp file in the same directory and rename it into place,
/// so readers never see a half-written session file.
fn write_atomic(dir: &Path, path: &Path, content: &str) -> StorageResult<()> {
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        StorageError::Unavailable(format!("cannot create temp file in {}: {}", dir.display(), e))
    })?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}

fn ensure_dir_exists(path: &Path) -> StorageResult<()> {
    if !path.is_dir() {
        debug!("Directory {:?} does not exist, creating...", path);
        fs::create_dir_all(path).map_err(|e| {
            StorageError::Unavailable(format!("cannot create {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

fn sanitize_session_id(session_id: &str) -> String {
    let cleaned: String = session_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}
