//! Skin catalog - tile palettes and unlock rules.
//!
//! Skins are plain data (hex colour strings). The terminal front end converts
//! them to RGB when drawing. A `skins.json` file holding a list of skins replaces
//! the built-in catalog when present.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::ROYAL_UNLOCK_WINS;

pub const CLASSIC: &str = "Classic";
pub const DARK: &str = "Dark";
pub const ROYAL: &str = "Royal";

/// A named palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Skin {
    pub name: String,
    /// Tile value -> "#RRGGBB"; key 0 is the empty-cell colour
    pub tile_colors: BTreeMap<u32, String>,
    pub background_color: String,
    pub grid_color: String,
    pub text_color: String,
}

impl Default for Skin {
    fn default() -> Self {
        Self::classic()
    }
}

impl Skin {
    pub fn classic() -> Self {
        Self::from_table(
            CLASSIC,
            "#FAF8EF",
            "#BBADA0",
            "#776E65",
            &[
                (0, "#CDC1B4"),
                (2, "#EEE4DA"),
                (4, "#EDE0C8"),
                (8, "#F2B179"),
                (16, "#F59563"),
                (32, "#F67C5F"),
                (64, "#F65E3B"),
                (128, "#EDCF72"),
                (256, "#EDCC61"),
                (512, "#EDC850"),
                (1024, "#EDC53F"),
                (2048, "#EDC22E"),
            ],
        )
    }

    pub fn dark() -> Self {
        Self::from_table(
            DARK,
            "#1E1E28",
            "#3A3A48",
            "#E6E6F0",
            &[
                (0, "#2A2A36"),
                (2, "#3F4A5A"),
                (4, "#46566B"),
                (8, "#2F6F8F"),
                (16, "#2A7FA8"),
                (32, "#2690C2"),
                (64, "#1FA2DC"),
                (128, "#3CB371"),
                (256, "#2E9E5E"),
                (512, "#23894D"),
                (1024, "#C9A227"),
                (2048, "#E0B52B"),
            ],
        )
    }

    pub fn royal() -> Self {
        Self::from_table(
            ROYAL,
            "#2B0F3A",
            "#4B1F66",
            "#FFF4D6",
            &[
                (0, "#3A1650"),
                (2, "#5B2A7A"),
                (4, "#6C3391"),
                (8, "#8E44AD"),
                (16, "#9B59B6"),
                (32, "#B0649F"),
                (64, "#C0392B"),
                (128, "#D4AC0D"),
                (256, "#DAB10F"),
                (512, "#E1B814"),
                (1024, "#EAC11C"),
                (2048, "#FFD700"),
            ],
        )
    }

    fn from_table(name: &str, bg: &str, grid: &str, text: &str, tiles: &[(u32, &str)]) -> Self {
        Self {
            name: name.to_string(),
            tile_colors: tiles.iter().map(|&(v, c)| (v, c.to_string())).collect(),
            background_color: bg.to_string(),
            grid_color: grid.to_string(),
            text_color: text.to_string(),
        }
    }

    /// Colour for a tile value.
    ///
    /// Values above the table use the largest entry; an empty table falls back
    /// to the grid colour.
    pub fn tile_color(&self, value: u32) -> &str {
        if let Some(c) = self.tile_colors.get(&value) {
            return c;
        }
        self.tile_colors
            .range(..=value)
            .next_back()
            .map(|(_, c)| c.as_str())
            .unwrap_or(&self.grid_color)
    }
}

/// Ordered list of available skins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinCatalog {
    skins: Vec<Skin>,
}

impl Default for SkinCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkinCatalog {
    pub fn builtin() -> Self {
        Self {
            skins: vec![Skin::classic(), Skin::dark(), Skin::royal()],
        }
    }

    /// Load a JSON list of skins.
    ///
    /// A missing, unreadable or empty file yields the built-in catalog. Skins
    /// without a name are skipped; later duplicates replace earlier ones.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("using built-in skins ({}: {})", path.display(), e);
                return Self::builtin();
            }
        };

        let list: Vec<Skin> = match serde_json::from_str(&text) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("ignoring skins file {}: {}", path.display(), e);
                return Self::builtin();
            }
        };

        let mut skins: Vec<Skin> = Vec::with_capacity(list.len());
        for skin in list.into_iter().filter(|s| !s.name.is_empty()) {
            match skins.iter_mut().find(|s| s.name == skin.name) {
                Some(existing) => *existing = skin,
                None => skins.push(skin),
            }
        }

        if skins.is_empty() {
            return Self::builtin();
        }
        if !skins.iter().any(|s| s.name == CLASSIC) {
            skins.insert(0, Skin::classic());
        }
        Self { skins }
    }

    /// Skin by name, falling back to Classic
    pub fn get(&self, name: &str) -> &Skin {
        self.skins
            .iter()
            .find(|s| s.name == name)
            .or_else(|| self.skins.iter().find(|s| s.name == CLASSIC))
            .unwrap_or(&self.skins[0])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skins.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    /// Royal needs at least one lifetime win; every other skin is always open
    pub fn is_unlocked(name: &str, total_wins: u32) -> bool {
        name != ROYAL || total_wins >= ROYAL_UNLOCK_WINS
    }

    /// Next unlocked skin after `current`, wrapping around
    pub fn next_unlocked(&self, current: &str, total_wins: u32) -> &Skin {
        let start = self
            .skins
            .iter()
            .position(|s| s.name == current)
            .unwrap_or(0);
        let n = self.skins.len();
        (1..=n)
            .map(|step| &self.skins[(start + step) % n])
            .find(|s| Self::is_unlocked(&s.name, total_wins))
            .unwrap_or(&self.skins[start])
    }
}
