//! Persistence module - user settings, lifetime statistics and skins
//!
//! Everything here is a thin I/O wrapper consumed by the front end. The engine
//! never touches it directly: the runner wires [`SettingsStore::record_win`] into
//! the engine's first-win hook.
//!
//! - [`settings`]: `Settings` record and the `SettingsStore` port with JSON-file and
//!   in-memory implementations
//! - [`skin`]: colour palettes, built-in catalog and unlock rules

pub mod settings;
pub mod skin;

pub use tui_2048_types as types;

pub use settings::{JsonFileStore, MemoryStore, Settings, SettingsStore, StoreError};
pub use skin::{Skin, SkinCatalog};
