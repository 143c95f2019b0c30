//! Client-local preferences.
//!
//! A tiny key/value store: one file per key under the platform data
//! directory on native targets, process memory on wasm. The only key the
//! client writes today is [`THEME_KEY`].

use crate::types::ThemeMode;
use anyhow::{Context, Result};
use tracing::warn;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::{collections::HashMap, sync::Mutex};

pub const THEME_KEY: &str = "theme";

#[cfg(target_arch = "wasm32")]
static MEMORY_PREFS: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Sanitize a preference key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct PrefStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl PrefStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_local_dir>/aprime/prefs`, or `cache/prefs` when the platform
    /// has no data directory.
    pub fn default_location() -> Self {
        match dirs::data_local_dir() {
            Some(data_dir) => Self::new(data_dir.join("aprime").join("prefs")),
            None => Self::new(PathBuf::from("cache").join("prefs")),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct PrefStore;

#[cfg(target_arch = "wasm32")]
impl PrefStore {
    pub fn default_location() -> Self {
        Self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let prefs = MEMORY_PREFS.lock().ok()?;
        prefs.get(&sanitize_key(key)).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut prefs = MEMORY_PREFS
            .lock()
            .map_err(|e| anyhow::anyhow!("preference store poisoned: {e}"))?;
        prefs.insert(sanitize_key(key), value.to_string());
        Ok(())
    }
}

impl PrefStore {
    /// Stored theme, or the default when missing or unreadable.
    pub fn load_theme(&self) -> ThemeMode {
        match self.get(THEME_KEY) {
            Some(raw) => raw.parse::<ThemeMode>().unwrap_or_else(|err: String| {
                warn!(%err, "ignoring stored theme");
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        }
    }

    pub fn save_theme(&self, theme: ThemeMode) -> Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }
}
