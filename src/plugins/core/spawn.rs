//! Per-kind spawn helpers.
//!
//! Each helper creates a simulation entity and attaches the stock bundle for its kind.
//! Sprite names follow the stock asset set; if a sprite is not registered the entity
//! simply has no visual.

use bevy::prelude::*;

use crate::common::layers::RenderLayer;
use crate::common::tunables::Tunables;
use crate::plugins::animation::attach_sprite;
use crate::plugins::projectiles::pool::init_projectile_pool;

use super::access::collider_at;
use super::components::{
    Ammo, AmmoPickup, AnimationState, Audio, Damage, EndLevel, Health, HealthBar, HealthPickup,
    MoveInput, Npc, Pc, ScoreValue, SimTransform, Speed, Velocity,
};
use super::lifecycle::create_entity;

pub const PLAYER_SPRITE_PREFIX: &str = "player";
pub const ENEMY_SPRITE_PREFIX: &str = "zombie";

/// The controllable unit: full health, half a clip of ammo and its own projectile pool.
pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let t = Tunables::current(world);
    let e = create_entity(world);
    world.entity_mut(e).insert((
        Pc,
        SimTransform::at(position),
        Velocity::default(),
        MoveInput::default(),
        Speed(t.player_speed),
        collider_at(position, t.entity_extent()),
        Health::new(t.default_max_health, t.default_max_health),
        HealthBar,
        Ammo::new(t.default_max_ammo / 2, t.default_max_ammo),
        Damage::new(t.player_damage),
        AnimationState::for_prefix(PLAYER_SPRITE_PREFIX),
        Audio::new(Some("player_hit_sound"), Some("shoot")),
    ));
    attach_sprite(world, e, "player_idle_down");
    init_projectile_pool(world, e, t.projectiles_per_owner);
    debug!("spawned player {e:?} at {position}");
    e
}

/// A chasing enemy. Starts wounded so health pickups and lifesteal have room to work.
pub fn spawn_enemy(world: &mut World, position: Vec2) -> Entity {
    let t = Tunables::current(world);
    let e = create_entity(world);
    world.entity_mut(e).insert((
        Npc,
        SimTransform::at(position).flipped(),
        Velocity::default(),
        MoveInput::default(),
        Speed(t.default_speed),
        collider_at(position, t.entity_extent()),
        Health::new(t.default_max_health / 2, t.default_max_health),
        HealthBar,
        Damage::new(t.default_damage),
        AnimationState::for_prefix(ENEMY_SPRITE_PREFIX),
        Audio::new(Some("zombie_hit_sound"), None),
        ScoreValue(t.default_score),
    ));
    attach_sprite(world, e, "zombie_idle_down");
    e
}

/// Static wall tile.
pub fn spawn_block(world: &mut World, position: Vec2) -> Entity {
    let size = Tunables::current(world).entity_extent();
    let e = create_entity(world);
    world
        .entity_mut(e)
        .insert((SimTransform::at(position), collider_at(position, size)));
    attach_sprite(world, e, "block");
    e
}

pub fn spawn_ammo_pickup(world: &mut World, position: Vec2) -> Entity {
    let size = Tunables::current(world).entity_extent();
    let e = create_entity(world);
    world.entity_mut(e).insert((
        AmmoPickup,
        SimTransform::at(position),
        collider_at(position, size),
        Audio::new(None, Some("ammo_sound")),
    ));
    attach_sprite(world, e, "ammoPickup");
    e
}

/// Heals on contact through a negative damage amount.
pub fn spawn_health_pickup(world: &mut World, position: Vec2) -> Entity {
    let t = Tunables::current(world);
    let e = create_entity(world);
    world.entity_mut(e).insert((
        HealthPickup,
        SimTransform::at(position),
        collider_at(position, t.entity_extent()),
        Damage::new(-t.heal_amount),
        Audio::new(None, Some("heal_sound")),
    ));
    attach_sprite(world, e, "healthPickUp");
    e
}

/// Level exit. Drawn on the ground layer so units walk over it.
pub fn spawn_end_level(world: &mut World, position: Vec2) -> Entity {
    let size = Tunables::current(world).entity_extent();
    let e = create_entity(world);
    world.entity_mut(e).insert((
        EndLevel,
        SimTransform::at(position).with_layer(RenderLayer::Ground),
        collider_at(position, size),
        Audio::new(None, Some("endLevel_sound")),
    ));
    attach_sprite(world, e, "endLevel");
    e
}
