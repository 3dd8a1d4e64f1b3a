//! Camera plugin: smoothed follow with world-bound clamping.
//!
//! The camera position is the top-left corner of the view in world units. It eases toward
//! a target centred on the controlled unit (or on the world when there is none), and the
//! target is clamped so the view never shows past the world edges. Vertically the clamp
//! leaves room for the HUD bands at the top and bottom of the screen.

use bevy::prelude::*;

use crate::common::state::{CameraState, PlayerEntity, WorldBounds};
use crate::common::tunables::Tunables;
use crate::plugins::core::components::{EntityId, Pc, SimTransform};

/// Clamp a camera target so a `view`-sized window stays inside `world`.
pub fn clamp_target(target: Vec2, world: Vec2, view: Vec2, hud: f32) -> Vec2 {
    let min_x = 0.0_f32.min(world.x - view.x);
    let max_x = 0.0_f32.max(world.x - view.x);
    let min_y = (-hud).min(world.y - view.y);
    let max_y = 0.0_f32.max(world.y - view.y + hud);
    Vec2::new(target.x.max(min_x).min(max_x), target.y.max(min_y).min(max_y))
}

/// Unclamped camera target: the focus point centred in the view.
#[inline]
pub fn camera_target(focus: Vec2, view: Vec2) -> Vec2 {
    focus - view * 0.5
}

/// Exponential ease of `current` toward `target`.
#[inline]
pub fn smooth_towards(current: Vec2, target: Vec2, smoothing: f32, dt: f32) -> Vec2 {
    current + (target - current) * smoothing * dt
}

enum Focus {
    Unit(Vec2),
    WorldCentre,
    /// The controlled entity has no transform; the camera stays put.
    Hold,
}

/// Prefers the controlled entity, then the first player by id.
fn pick_focus(world: &mut World) -> Focus {
    if let Some(player) = world.get_resource::<PlayerEntity>().and_then(|p| p.0) {
        return world
            .get::<SimTransform>(player)
            .map_or(Focus::Hold, |t| Focus::Unit(t.position));
    }
    world
        .query_filtered::<(&EntityId, &SimTransform), With<Pc>>()
        .iter(world)
        .min_by_key(|(id, _)| **id)
        .map_or(Focus::WorldCentre, |(_, t)| Focus::Unit(t.position))
}

/// Advance the camera one frame for a `view`-sized window.
pub fn follow_camera(world: &mut World, view: Vec2, dt: f32) {
    let bounds = world.get_resource::<WorldBounds>().copied().unwrap_or_default();
    let focus = match pick_focus(world) {
        Focus::Unit(p) => p,
        Focus::WorldCentre => bounds.center(),
        Focus::Hold => return,
    };
    let t = Tunables::current(world);
    let target = clamp_target(camera_target(focus, view), bounds.size, view, t.hud_band);

    let mut camera = world.get_resource_or_insert_with(CameraState::default);
    camera.position = smooth_towards(camera.position, target, t.camera_smoothing, dt);
}

pub fn set_world_dimensions(world: &mut World, width: f32, height: f32) {
    world.get_resource_or_insert_with(WorldBounds::default).size = Vec2::new(width, height);
}

pub fn camera_position(world: &World) -> Vec2 {
    world.get_resource::<CameraState>().map_or(Vec2::ZERO, |c| c.position)
}
