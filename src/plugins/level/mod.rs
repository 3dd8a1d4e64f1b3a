//! Level plugin: ground tiles, level progress and the level clear.

use bevy::math::IVec2;
use bevy::prelude::*;

use crate::common::state::{CameraState, LevelProgress};
use crate::common::tunables::Tunables;
use crate::plugins::core::components::Pc;
use crate::plugins::core::lifecycle::{destroy_entity, flush_destroyed_now, live_entities};
use crate::plugins::projectiles::pool::{ProjectilePools, init_projectile_pool};

/// A background tile. Tiles are not entities and never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTile {
    pub sprite: String,
    pub position: IVec2,
}

/// Background tiles in draw order.
#[derive(Resource, Debug, Default)]
pub struct GroundTiles(pub Vec<GroundTile>);

pub fn add_ground_tile(world: &mut World, sprite: &str, x: i32, y: i32) {
    world
        .get_resource_or_insert_with(GroundTiles::default)
        .0
        .push(GroundTile { sprite: sprite.to_owned(), position: IVec2::new(x, y) });
}

pub fn set_levels_count(world: &mut World, count: usize) {
    world.get_resource_or_insert_with(LevelProgress::default).count = count.max(1);
}

pub fn set_level_changing(world: &mut World, changing: bool) {
    world.get_resource_or_insert_with(LevelProgress::default).changing = changing;
}

pub fn is_level_changing(world: &World) -> bool {
    world.get_resource::<LevelProgress>().is_some_and(|p| p.changing)
}

pub fn is_game_completed(world: &World) -> bool {
    world.get_resource::<LevelProgress>().is_some_and(|p| p.completed)
}

pub fn current_level(world: &World) -> usize {
    world.get_resource::<LevelProgress>().map_or(0, |p| p.current)
}

/// Empty the world for the next level, keeping only `keep` (`None` keeps nothing).
///
/// Removal is immediate, not deferred: the next level is built right after this returns.
/// Ground tiles are cleared and the camera returns to the origin. Every projectile pool is
/// dropped; if `keep` is a player that had one, it gets a fresh pool.
pub fn clear_level_except(world: &mut World, keep: Option<Entity>) {
    let keeper_had_pool = keep.is_some_and(|k| {
        world
            .get_resource::<ProjectilePools>()
            .is_some_and(|p| p.contains(k))
    });

    for e in live_entities(world) {
        if Some(e) != keep {
            destroy_entity(world, e);
        }
    }
    let removed = flush_destroyed_now(world);

    if let Some(mut pools) = world.get_resource_mut::<ProjectilePools>() {
        pools.clear();
    }
    if let Some(mut tiles) = world.get_resource_mut::<GroundTiles>() {
        tiles.0.clear();
    }
    if let Some(mut camera) = world.get_resource_mut::<CameraState>() {
        camera.position = Vec2::ZERO;
    }

    let refill = keep.filter(|&k| keeper_had_pool && world.get::<Pc>(k).is_some());
    if let Some(k) = refill {
        let size = Tunables::current(world).projectiles_per_owner;
        init_projectile_pool(world, k, size);
    }
    debug!("level cleared: {removed} entities removed");
}

pub fn plugin(app: &mut App) {
    app.init_resource::<GroundTiles>();
}
