//! Board construction settings
//!
//! Everything the host can tune without touching level text: tile size,
//! which vehicle is the target, and vehicle colors. Stored as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TILE_SIZE;
use crate::error::Result;
use crate::puzzle::{Board, TargetSelector, level};
use crate::style::Palette;

/// Board settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cell edge length in pixels
    pub tile_size: u32,
    /// Rule picking the vehicle that must reach the exit
    pub target: TargetSelector,
    /// Vehicle colors by kind
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            target: TargetSelector::AlignedWithExit,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Parse settings; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings: tile {}px, target {:?}",
            settings.tile_size,
            settings.target
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode `text` into a board using these settings
    pub fn board(&self, text: &str) -> Result<Board> {
        let level = level::decode(text, &self.palette)?;
        Board::from_decoded(level, self.tile_size, self.target)
    }
}
