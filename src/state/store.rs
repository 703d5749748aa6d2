//! File-backed state storage.
//!
//! State lives in a single YAML file, `~/.prerelease-updater/state.yml` by
//! default, and every update is written through immediately.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::GlobalState;
use crate::error::{Result, UpdaterError};

/// On-disk layout of the state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateFile {
    /// Schema version for migration.
    #[serde(default = "current_version")]
    version: u32,

    /// Stored entries.
    #[serde(default)]
    entries: BTreeMap<String, Value>,
}

fn current_version() -> u32 {
    FileStateStore::CURRENT_VERSION
}

/// Durable [`GlobalState`] persisted as YAML.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStateStore {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// File name inside the state directory.
    pub const FILE_NAME: &'static str = "state.yml";

    /// Default state directory.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".prerelease-updater")
    }

    /// Open the store in `dir`, starting empty if the file does not exist.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);

        if !path.exists() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let file: StateFile = if content.trim().is_empty() {
            StateFile::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| UpdaterError::StateError {
                path: path.clone(),
                message: e.to_string(),
            })?
        };

        Ok(Self {
            path,
            entries: file.entries,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save state to disk using atomic write.
    ///
    /// Writes to a sibling temp file and renames it over the target so the
    /// state file is never partially written.
    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = StateFile {
            version: Self::CURRENT_VERSION,
            entries: self.entries.clone(),
        };
        let content = serde_yaml::to_string(&file).map_err(|e| UpdaterError::StateError {
            path: self.path.clone(),
            message: format!("Failed to serialize state: {}", e),
        })?;

        let temp_path = self.path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl GlobalState for FileStateStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            // Keep memory consistent with disk.
            match previous {
                Some(v) => self.entries.insert(key.to_string(), v),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.save()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
