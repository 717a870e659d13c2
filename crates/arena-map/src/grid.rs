//! ArenaMap: a grid of solid/floor tiles plus named spawn points.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use arena_core::constants::DEFAULT_TILE_SIZE;
use arena_core::types::{Aabb, Position};

/// Named spawn location in arena pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl SpawnPoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Loaded arena map.
#[derive(Debug, Clone)]
pub struct ArenaMap {
    /// Tile edge length (px).
    pub tile_size: f64,
    pub columns: u32,
    pub rows: u32,
    /// Row-major solid flags, `columns * rows` long.
    solid: Vec<bool>,
    spawns: Vec<SpawnPoint>,
}

const DEFAULT_LAYOUT: [&str; 20] = [
    "....................",
    "....................",
    "....................",
    ".....##......##.....",
    ".....#........#.....",
    "....................",
    "....................",
    "....................",
    ".........##.........",
    "........####........",
    "........####........",
    ".........##.........",
    "....................",
    "....................",
    "....................",
    ".....#........#.....",
    ".....##......##.....",
    "....................",
    "....................",
    "....................",
];

impl ArenaMap {
    /// Build a map from pre-validated data. Spawn points that sit outside
    /// the arena or inside a solid tile are dropped.
    pub fn new(
        tile_size: f64,
        columns: u32,
        rows: u32,
        solid: Vec<bool>,
        spawns: Vec<SpawnPoint>,
    ) -> Self {
        debug_assert_eq!(solid.len(), (columns * rows) as usize);
        let mut map = Self {
            tile_size,
            columns,
            rows,
            solid,
            spawns: Vec::new(),
        };
        for spawn in spawns {
            if map.contains(spawn.x, spawn.y) && !map.is_solid_at(spawn.x, spawn.y) {
                map.spawns.push(spawn);
            } else {
                tracing::warn!(name = %spawn.name, x = spawn.x, y = spawn.y, "ignoring unusable spawn point");
            }
        }
        map
    }

    /// The built-in 640×640 arena: open floor, a few cover blocks,
    /// and one spawn point near each corner.
    pub fn default_arena() -> Self {
        let tile = DEFAULT_TILE_SIZE;
        let solid = DEFAULT_LAYOUT
            .iter()
            .flat_map(|row| row.bytes().map(|b| b == b'#'))
            .collect();
        let spawns = vec![
            SpawnPoint::new("spawn1", 2.5 * tile, 2.5 * tile),
            SpawnPoint::new("spawn2", 17.5 * tile, 17.5 * tile),
            SpawnPoint::new("spawn3", 17.5 * tile, 2.5 * tile),
            SpawnPoint::new("spawn4", 2.5 * tile, 17.5 * tile),
        ];
        Self::new(tile, 20, 20, solid, spawns)
    }

    pub fn width(&self) -> f64 {
        self.columns as f64 * self.tile_size
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * self.tile_size
    }

    pub fn spawns(&self) -> &[SpawnPoint] {
        &self.spawns
    }

    /// Spawn point named `spawn{index}` (1-based, as authored in map files).
    pub fn find_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        let name = format!("spawn{index}");
        self.spawns.iter().find(|s| s.name == name)
    }

    /// Whether a point lies inside the arena rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width() && y < self.height()
    }

    /// Whether the tile under a point is solid. Outside the grid is open;
    /// the arena bounds are enforced separately.
    pub fn is_solid_at(&self, x: f64, y: f64) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let col = (x / self.tile_size) as u32;
        let row = (y / self.tile_size) as u32;
        self.is_solid_tile(col, row)
    }

    pub fn is_solid_tile(&self, col: u32, row: u32) -> bool {
        if col >= self.columns || row >= self.rows {
            return false;
        }
        self.solid[(row * self.columns + col) as usize]
    }

    /// Whether any solid tile overlaps the box.
    pub fn blocked(&self, aabb: &Aabb) -> bool {
        self.overlapping_tiles(aabb).next().is_some()
    }

    /// Move a box by `delta`, x axis first then y. The box is clamped to the
    /// arena bounds and stops flush against the first solid tile in its path,
    /// however long the step. Returns the new centre.
    pub fn resolve_move(&self, aabb: Aabb, delta: DVec2) -> DVec2 {
        let mut center = aabb.center;
        let half = aabb.half;

        if delta.x != 0.0 {
            let from = Aabb { center, half };
            let mut x = clamp_axis(center.x + delta.x, half.x, self.width());
            let swept = sweep(&from, DVec2::new(x, center.y));
            for (tile_min, tile_max) in self.overlapping_tiles(&swept) {
                if delta.x > 0.0 && tile_min.x >= from.max().x - EPSILON {
                    x = x.min(tile_min.x - half.x);
                } else if delta.x < 0.0 && tile_max.x <= from.min().x + EPSILON {
                    x = x.max(tile_max.x + half.x);
                }
            }
            center.x = x;
        }

        if delta.y != 0.0 {
            let from = Aabb { center, half };
            let mut y = clamp_axis(center.y + delta.y, half.y, self.height());
            let swept = sweep(&from, DVec2::new(center.x, y));
            for (tile_min, tile_max) in self.overlapping_tiles(&swept) {
                if delta.y > 0.0 && tile_min.y >= from.max().y - EPSILON {
                    y = y.min(tile_min.y - half.y);
                } else if delta.y < 0.0 && tile_max.y <= from.min().y + EPSILON {
                    y = y.max(tile_max.y + half.y);
                }
            }
            center.y = y;
        }

        center
    }

    /// Bounds of every solid tile that strictly overlaps the box.
    fn overlapping_tiles<'a>(&'a self, aabb: &Aabb) -> impl Iterator<Item = (DVec2, DVec2)> + 'a {
        let ts = self.tile_size;
        let (min, max) = (aabb.min(), aabb.max());
        let col_lo = (min.x / ts).floor().max(0.0) as u32;
        let row_lo = (min.y / ts).floor().max(0.0) as u32;
        let col_hi = ((max.x / ts).ceil().max(0.0) as u32).min(self.columns);
        let row_hi = ((max.y / ts).ceil().max(0.0) as u32).min(self.rows);

        (row_lo..row_hi)
            .flat_map(move |row| (col_lo..col_hi).map(move |col| (col, row)))
            .filter(move |&(col, row)| self.is_solid_tile(col, row))
            .map(move |(col, row)| {
                let tile_min = DVec2::new(col as f64 * ts, row as f64 * ts);
                (tile_min, tile_min + DVec2::splat(ts))
            })
            .filter(move |&(tile_min, tile_max)| {
                tile_min.x < max.x && tile_max.x > min.x && tile_min.y < max.y && tile_max.y > min.y
            })
    }
}

/// Keep a box of half extent `half` inside `0..extent` on one axis.
/// A box wider than the arena is pinned to its middle.
fn clamp_axis(value: f64, half: f64, extent: f64) -> f64 {
    let (lo, hi) = (half, extent - half);
    if lo > hi {
        extent / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

/// Tolerance for boxes resting exactly on a tile edge.
const EPSILON: f64 = 1e-9;

/// Box covering `from` and the same box moved to `to`.
fn sweep(from: &Aabb, to: DVec2) -> Aabb {
    let min = from.min().min(to - from.half);
    let max = from.max().max(to + from.half);
    Aabb {
        center: (min + max) * 0.5,
        half: (max - min) * 0.5,
    }
}

impl Default for ArenaMap {
    fn default() -> Self {
        Self::default_arena()
    }
}
