//! Settings and lifetime statistics.
//!
//! The on-disk format is a single pretty-printed JSON object with PascalCase keys
//! (`CurrentSkin`, `AnimationSpeed`, `DarkTheme`, `TotalWins`). Missing keys fall
//! back to their defaults so older files keep loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DEFAULT_ANIMATION_SPEED, MAX_ANIMATION_SPEED, MIN_ANIMATION_SPEED};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings io error: {0}")]
    Io(#[from] io::Error),
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persisted user preferences plus the lifetime win counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub current_skin: String,
    pub animation_speed: u8,
    pub dark_theme: bool,
    pub total_wins: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_skin: "Classic".to_string(),
            animation_speed: DEFAULT_ANIMATION_SPEED,
            dark_theme: false,
            total_wins: 0,
        }
    }
}

impl Settings {
    /// Clamp values that may have been hand-edited out of range
    pub fn normalized(mut self) -> Self {
        self.animation_speed = self
            .animation_speed
            .clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
        if self.current_skin.trim().is_empty() {
            self.current_skin = Settings::default().current_skin;
        }
        self
    }

    pub fn speed_up(&mut self) {
        self.animation_speed = self.animation_speed.saturating_add(1).min(MAX_ANIMATION_SPEED);
    }

    pub fn speed_down(&mut self) {
        self.animation_speed = self
            .animation_speed
            .saturating_sub(1)
            .max(MIN_ANIMATION_SPEED);
    }
}

/// Persistence port for settings and statistics
pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;

    fn save(&self, settings: &Settings) -> Result<()>;

    /// Bump the lifetime win counter and return the new total
    fn record_win(&self) -> Result<u32> {
        let mut settings = self.load()?;
        settings.total_wins = settings.total_wins.saturating_add(1);
        self.save(&settings)?;
        Ok(settings.total_wins)
    }
}

/// Settings stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_defaults(&self) -> Result<Settings> {
        let settings = Settings::default();
        self.save(&settings)?;
        Ok(settings)
    }
}

impl SettingsStore for JsonFileStore {
    /// Missing file: defaults are written back. Unreadable JSON: logged and
    /// replaced by defaults. Any other I/O failure is returned.
    fn load(&self) -> Result<Settings> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, writing defaults", self.path.display());
                return self.write_defaults();
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Settings>(&text) {
            Ok(settings) => Ok(settings.normalized()),
            Err(e) => {
                log::warn!(
                    "discarding unreadable settings {}: {}",
                    self.path.display(),
                    e
                );
                self.write_defaults()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and headless embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Settings>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = settings.clone();
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for std::rc::Rc<S> {
    fn load(&self) -> Result<Settings> {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        (**self).save(settings)
    }

    fn record_win(&self) -> Result<u32> {
        (**self).record_win()
    }
}
