//! Level layouts: numeric grids turned into entities and ground tiles.
//!
//! | code | content                                   |
//! |------|-------------------------------------------|
//! | 1    | wall block                                |
//! | 2    | player start (moves an existing player)   |
//! | 3    | enemy                                     |
//! | 4    | road tile                                 |
//! | 5    | horizontal road tile                      |
//! | 6    | vertical road tile                        |
//! | 10   | level exit                                |
//!
//! Every cell also gets a random ground tile underneath. Pickups are scattered afterwards
//! at random free spots.

use std::path::Path;

use bevy::math::{IRect, IVec2};
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::geometry::{intersects, rect_at};
use crate::common::tunables::{ConfigError, Tunables};
use crate::plugins::camera::set_world_dimensions;
use crate::plugins::core::access::{collider_rect, set_entity_position};
use crate::plugins::core::lifecycle::is_live;
use crate::plugins::core::spawn::{
    spawn_ammo_pickup, spawn_block, spawn_end_level, spawn_enemy, spawn_health_pickup, spawn_player,
};
use crate::plugins::level::{add_ground_tile, current_level, set_levels_count};

/// Ground variants, picked uniformly per cell. The plain tile is listed twice.
pub const GROUND_VARIANTS: [&str; 5] = ["ground", "ground2", "ground3", "ground4", "ground"];

/// Tries per pickup before giving up on it.
pub const PLACEMENT_ATTEMPTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCode {
    Block,
    PlayerStart,
    Enemy,
    Road,
    RoadHorizontal,
    RoadVertical,
    Exit,
}

impl TileCode {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::Block,
            2 => Self::PlayerStart,
            3 => Self::Enemy,
            4 => Self::Road,
            5 => Self::RoadHorizontal,
            6 => Self::RoadVertical,
            10 => Self::Exit,
            _ => return None,
        })
    }
}

/// One level: rows of tile codes, top row first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelGrid {
    pub rows: Vec<Vec<u8>>,
}

impl LevelGrid {
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    /// `(columns, rows)` of the widest row.
    pub fn dimensions(&self) -> IVec2 {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        IVec2::new(cols as i32, self.rows.len() as i32)
    }

    fn cells(&self) -> impl Iterator<Item = (IVec2, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &code)| (IVec2::new(col as i32, row as i32), code))
        })
    }
}

fn default_ammo_pickups() -> usize {
    5
}

fn default_health_pickups() -> usize {
    3
}

/// Every level of a game plus per-level pickup counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<LevelGrid>,
    #[serde(default = "default_ammo_pickups")]
    pub ammo_pickups: usize,
    #[serde(default = "default_health_pickups")]
    pub health_pickups: usize,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelGrid>) -> Self {
        Self {
            levels,
            ammo_pickups: default_ammo_pickups(),
            health_pickups: default_health_pickups(),
        }
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }
}

/// Build `grid` into the world.
///
/// `player` is moved to the start cell if it is still alive; otherwise a new player is
/// spawned there. Returns the player, if the grid has a start cell or one was passed in.
pub fn build_level<R: Rng + ?Sized>(
    world: &mut World,
    grid: &LevelGrid,
    player: Option<Entity>,
    rng: &mut R,
) -> Option<Entity> {
    let tile = Tunables::current(world).entity_size;
    let mut player = player.filter(|&p| is_live(world, p));

    let size = grid.dimensions() * tile;
    set_world_dimensions(world, size.x as f32, size.y as f32);

    for (cell, code) in grid.cells() {
        let at = cell * tile;
        let ground = GROUND_VARIANTS[rng.gen_range(0..GROUND_VARIANTS.len())];
        add_ground_tile(world, ground, at.x, at.y);

        let Some(code) = TileCode::from_code(code) else {
            continue;
        };
        let position = at.as_vec2();
        match code {
            TileCode::Block => {
                spawn_block(world, position);
            }
            TileCode::PlayerStart => match player {
                Some(p) => set_entity_position(world, p, position),
                None => player = Some(spawn_player(world, position)),
            },
            TileCode::Enemy => {
                spawn_enemy(world, position);
            }
            TileCode::Road => add_ground_tile(world, "road", at.x, at.y),
            TileCode::RoadHorizontal => add_ground_tile(world, "roadH", at.x, at.y),
            TileCode::RoadVertical => add_ground_tile(world, "roadV", at.x, at.y),
            TileCode::Exit => {
                spawn_end_level(world, position);
            }
        }
    }
    debug!("built level {}x{} tiles", grid.dimensions().x, grid.dimensions().y);
    player
}

/// Place up to `count` items at random spots inside `bounds` (less a one-tile margin)
/// that overlap none of `occupied`. Placed items are added to `occupied`.
pub fn scatter_items<R: Rng + ?Sized>(
    world: &mut World,
    count: usize,
    bounds: IVec2,
    occupied: &mut Vec<IRect>,
    rng: &mut R,
    spawn: fn(&mut World, Vec2) -> Entity,
) -> usize {
    let tile = Tunables::current(world).entity_size;
    let (max_x, max_y) = (bounds.x - tile, bounds.y - tile);
    if max_x < tile || max_y < tile {
        return 0;
    }

    let mut placed = 0;
    for _ in 0..count {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let at = IVec2::new(rng.gen_range(tile..=max_x), rng.gen_range(tile..=max_y));
            let spot = rect_at(at, IVec2::splat(tile));
            if occupied.iter().any(|r| intersects(r, &spot)) {
                continue;
            }
            let e = spawn(world, at.as_vec2());
            occupied.push(collider_rect(world, e).unwrap_or(spot));
            placed += 1;
            break;
        }
    }
    placed
}

/// Build the current level of `levels` and scatter its pickups around the walls.
pub fn load_current_level<R: Rng + ?Sized>(
    world: &mut World,
    levels: &LevelSet,
    player: Option<Entity>,
    rng: &mut R,
) -> Option<Entity> {
    set_levels_count(world, levels.levels.len());
    let index = current_level(world);
    let Some(grid) = levels.levels.get(index) else {
        warn!("no layout for level {index}");
        return player;
    };

    let player = build_level(world, grid, player, rng);

    let tile = Tunables::current(world).entity_size;
    let mut occupied: Vec<IRect> = grid
        .cells()
        .filter(|&(_, code)| TileCode::from_code(code) == Some(TileCode::Block))
        .map(|(cell, _)| rect_at(cell * tile, IVec2::splat(tile)))
        .collect();
    let bounds = grid.dimensions() * tile;
    scatter_items(world, levels.ammo_pickups, bounds, &mut occupied, rng, spawn_ammo_pickup);
    scatter_items(world, levels.health_pickups, bounds, &mut occupied, rng, spawn_health_pickup);
    info!("level {index} loaded");
    player
}

#[cfg(test)]
mod tests;
