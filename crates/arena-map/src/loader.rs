//! JSON map format loader.
//!
//! ```json
//! {
//!   "tile_size": 32,
//!   "rows": ["....#", "....."],
//!   "spawns": [{ "name": "spawn1", "x": 16, "y": 16 }]
//! }
//! ```
//!
//! `#` marks a solid tile, `.` open floor. Every row must have the same width,
//! and the map must be at least one player box wide and tall.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use arena_core::constants::PLAYER_HALF_SIZE;

use crate::grid::{ArenaMap, SpawnPoint};

const SOLID_GLYPH: char = '#';
const FLOOR_GLYPH: char = '.';

#[derive(Error, Debug)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Map has no tiles")]
    Empty,
    #[error("Tile size must be positive, got {0}")]
    InvalidTileSize(f64),
    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown tile glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("Map is {width}x{height} px, smaller than a {min} px player")]
    TooSmall { width: f64, height: f64, min: f64 },
}

/// On-disk representation of a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    pub tile_size: f64,
    pub rows: Vec<String>,
    #[serde(default)]
    pub spawns: Vec<SpawnPoint>,
}

impl ArenaMap {
    /// Load a map from a JSON file.
    pub fn load(path: &Path) -> Result<ArenaMap, MapError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse a map from JSON text.
    pub fn from_json(json: &str) -> Result<ArenaMap, MapError> {
        let file: MapFile = serde_json::from_str(json)?;
        Self::from_map_file(file)
    }

    /// Validate and build a map from its file representation.
    pub fn from_map_file(file: MapFile) -> Result<ArenaMap, MapError> {
        if !(file.tile_size > 0.0) {
            return Err(MapError::InvalidTileSize(file.tile_size));
        }

        let expected = file.rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if expected == 0 {
            return Err(MapError::Empty);
        }

        let mut solid = Vec::with_capacity(expected * file.rows.len());
        for (row, line) in file.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(MapError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                match glyph {
                    SOLID_GLYPH => solid.push(true),
                    FLOOR_GLYPH => solid.push(false),
                    _ => return Err(MapError::UnknownGlyph { glyph, row, col }),
                }
            }
        }

        let width = expected as f64 * file.tile_size;
        let height = file.rows.len() as f64 * file.tile_size;
        let min = 2.0 * PLAYER_HALF_SIZE;
        if width < min || height < min {
            return Err(MapError::TooSmall { width, height, min });
        }

        Ok(ArenaMap::new(
            file.tile_size,
            expected as u32,
            file.rows.len() as u32,
            solid,
            file.spawns,
        ))
    }
}
