use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::menu_card_home;
use crate::error::Result;

/// Where the chosen language survives between sessions.
///
/// A single value is stored. Implementations never validate it; the locale
/// resolver discards unsupported codes.
pub trait PreferenceStore: Send {
    fn load(&self) -> Option<String>;
    fn store(&mut self, code: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    value: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn store(&mut self, code: &str) -> Result<()> {
        self.value = Some(code.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preferred_lang: Option<String>,
}

/// `preference.json` with the single key `preferred_lang`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_home() -> Self {
        Self::new(menu_card_home().join("preference.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, file: &PreferenceFile) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let body = serde_json::to_vec_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("failed to read {:?}: {}", self.path, err);
                return None;
            }
        };
        match serde_json::from_str::<PreferenceFile>(&text) {
            Ok(file) => file.preferred_lang.filter(|s| !s.trim().is_empty()),
            Err(err) => {
                warn!("ignoring unreadable {:?}: {}", self.path, err);
                None
            }
        }
    }

    fn store(&mut self, code: &str) -> Result<()> {
        self.write(&PreferenceFile {
            preferred_lang: Some(code.to_string()),
        })
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
