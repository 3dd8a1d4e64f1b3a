//! Glue-facing setters and getters.
//!
//! Absent components read as `None`; setters on entities without the component are no-ops
//! unless noted.

use bevy::math::IRect;
use bevy::prelude::*;

use crate::common::geometry::{moved_to, rect_at, round_to_grid};

use super::components::{Ammo, Collider, Health, MoveInput, Npc, PendingDestroy, SimTransform};

/// Store a steering request, clamping each axis to [-1, 1]. Inserts `MoveInput` if missing.
pub fn set_entity_input(world: &mut World, entity: Entity, input: Vec2) {
    let input = input.clamp(Vec2::NEG_ONE, Vec2::ONE);
    if let Ok(mut e) = world.get_entity_mut(entity) {
        e.insert(MoveInput(input));
    }
}

/// Teleport an entity: spawn point, committed and tentative positions plus its collider.
pub fn set_entity_position(world: &mut World, entity: Entity, position: Vec2) {
    let Ok(mut e) = world.get_entity_mut(entity) else {
        return;
    };
    if let Some(mut t) = e.get_mut::<SimTransform>() {
        t.relocate(position);
    }
    if let Some(mut c) = e.get_mut::<Collider>() {
        c.rect = moved_to(c.rect, round_to_grid(position));
    }
}

pub fn entity_position(world: &World, entity: Entity) -> Option<Vec2> {
    world.get::<SimTransform>(entity).map(|t| t.position)
}

pub fn collider_rect(world: &World, entity: Entity) -> Option<IRect> {
    world.get::<Collider>(entity).map(|c| c.rect)
}

pub fn health(world: &World, entity: Entity) -> Option<i32> {
    world.get::<Health>(entity).map(|h| h.current)
}

pub fn ammo(world: &World, entity: Entity) -> Option<i32> {
    world.get::<Ammo>(entity).map(|a| a.current)
}

/// Enemies still in play. Enemies already queued for removal are not counted.
pub fn npc_count(world: &mut World) -> usize {
    world
        .query_filtered::<(), (With<Npc>, Without<PendingDestroy>)>()
        .iter(world)
        .count()
}

/// Square collider of `size` world units anchored at `position`.
#[inline]
pub fn collider_at(position: Vec2, size: IVec2) -> Collider {
    Collider { rect: rect_at(round_to_grid(position), size) }
}
