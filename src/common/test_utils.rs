//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()` after
//! running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::state::{CameraState, LevelProgress, PlayerEntity, Score, WorldBounds};
use crate::common::tunables::Tunables;
use crate::plugins::assets::audio::PlaySound;
use crate::plugins::assets::{SoundHandle, SoundRegistry, SpriteRegistry, SpriteSheet, TextureHandle};
use crate::plugins::core::lifecycle::EntityAllocator;
use crate::plugins::level::GroundTiles;
use crate::plugins::projectiles::pool::ProjectilePools;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a `Time` that has already advanced by `dt` seconds.
pub fn insert_time_with_delta(world: &mut World, dt: f32) {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(t);
}

/// Advance the world's `Time` by `dt` seconds (inserting it if missing).
pub fn advance_time(world: &mut World, dt: f32) {
    if !world.contains_resource::<Time>() {
        world.insert_resource(Time::<()>::default());
    }
    world.resource_mut::<Time>().advance_by(Duration::from_secs_f32(dt));
}

/// A bare world with every simulation resource installed and time at zero.
pub fn sim_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<EntityAllocator>();
    world.init_resource::<PlayerEntity>();
    world.init_resource::<Score>();
    world.init_resource::<LevelProgress>();
    world.init_resource::<CameraState>();
    world.init_resource::<WorldBounds>();
    world.init_resource::<SpriteRegistry>();
    world.init_resource::<SoundRegistry>();
    world.init_resource::<GroundTiles>();
    world.init_resource::<ProjectilePools>();
    world.init_resource::<Messages<PlaySound>>();
    world.insert_resource(Time::<()>::default());
    world
}

/// A 16x16 single-row sheet with `frames` frames.
pub fn sheet(frames: u32, looping: bool) -> SpriteSheet {
    SpriteSheet {
        texture: TextureHandle(1),
        texture_width: 16 * frames as i32,
        texture_height: 16,
        frame_width: 16,
        frame_height: 16,
        frame_count: frames,
        start_frame: 0,
        looping,
        scale: 1.0,
    }
}

pub fn register_sprite(world: &mut World, name: &str, frames: u32, looping: bool) {
    world
        .resource_mut::<SpriteRegistry>()
        .insert(name, sheet(frames, looping));
}

/// Register every name with a distinct handle.
pub fn register_sounds(world: &mut World, names: &[&str]) {
    let mut registry = world.resource_mut::<SoundRegistry>();
    for (i, name) in names.iter().enumerate() {
        registry.insert(*name, SoundHandle(i as u32 + 1));
    }
}

/// Names of every queued sound, oldest first. Empties the queue.
pub fn drain_sounds(world: &mut World) -> Vec<String> {
    world
        .resource_mut::<Messages<PlaySound>>()
        .drain()
        .map(|m| m.name)
        .collect()
}
