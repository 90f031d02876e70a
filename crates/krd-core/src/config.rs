//! Converter configuration
//!
//! Every field has a default, so a missing or partial JSON file is fine.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Tile index the engine uses to place bats in guarded exits
pub const DEFAULT_BAT_PLACEMENT_TILE: u8 = 73;

/// Tile definitions file included by the generated output
pub const DEFAULT_TILES_INCLUDE: &str = "tiles.txt";

/// Options controlling a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Value written as `bat_placement_tile` for guarded exits
    pub bat_placement_tile: u8,
    /// File named by the `include` line of the preamble
    pub tiles_include: String,
    /// Fail on inputs tagged as holding several banks
    pub reject_multi_bank: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            bat_placement_tile: DEFAULT_BAT_PLACEMENT_TILE,
            tiles_include: DEFAULT_TILES_INCLUDE.to_string(),
            reject_multi_bank: true,
        }
    }
}

impl ConvertConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
