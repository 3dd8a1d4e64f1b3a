//! Per-owner projectile pools.
//!
//! Projectiles are never spawned per shot. Each owner gets a fixed set of entities up
//! front; firing activates the first parked one and a hit parks it again. Parked
//! projectiles keep every component and only toggle `SimTransform::active`.

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;

use crate::common::geometry::{moved_to, round_to_grid};
use crate::common::state::CameraState;
use crate::common::tunables::Tunables;
use crate::plugins::animation::attach_sprite;
use crate::plugins::assets::SpriteRegistry;
use crate::plugins::assets::audio::play_sound;
use crate::plugins::core::access::collider_at;
use crate::plugins::core::components::{
    Ammo, Audio, Collider, Damage, Projectile, SimTransform, Speed, Velocity,
};
use crate::plugins::core::lifecycle::create_entity;

#[derive(Resource, Debug, Default)]
pub struct ProjectilePools {
    pools: HashMap<Entity, Vec<Entity>>,
}

impl ProjectilePools {
    #[inline]
    pub fn get(&self, owner: Entity) -> Option<&[Entity]> {
        self.pools.get(&owner).map(Vec::as_slice)
    }

    #[inline]
    pub fn contains(&self, owner: Entity) -> bool {
        self.pools.contains_key(&owner)
    }

    pub fn insert(&mut self, owner: Entity, pool: Vec<Entity>) {
        self.pools.insert(owner, pool);
    }

    pub fn remove(&mut self, owner: Entity) -> Option<Vec<Entity>> {
        self.pools.remove(&owner)
    }

    pub fn clear(&mut self) {
        self.pools.clear();
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Pre-create `size` parked projectiles for `owner`.
///
/// Each carries the owner's damage (or the default), the projectile speed, and a collider
/// sized from the projectile sprite. Returns `false` if the owner already has a pool.
pub fn init_projectile_pool(world: &mut World, owner: Entity, size: usize) -> bool {
    if world
        .get_resource::<ProjectilePools>()
        .is_some_and(|p| p.contains(owner))
    {
        return false;
    }

    let t = Tunables::current(world);
    let damage = world
        .get::<Damage>(owner)
        .map_or(t.default_damage, |d| d.amount);
    let (extent, scale) = world
        .get_resource::<SpriteRegistry>()
        .and_then(|r| r.get(&t.projectile_sprite))
        .map_or((t.entity_extent(), 1.0), |s| (s.scaled_size(s.scale), s.scale));
    let park = t.park_position();

    let mut pool = Vec::with_capacity(size);
    for _ in 0..size {
        let e = create_entity(world);
        world.entity_mut(e).insert((
            Projectile { owner },
            SimTransform::at(park).with_scale(scale).inactive(),
            collider_at(park, extent),
            Damage::new(damage),
            Velocity::default(),
            Speed(t.projectile_speed),
        ));
        attach_sprite(world, e, &t.projectile_sprite);
        pool.push(e);
    }

    debug!("projectile pool for {owner:?}: {size} entries");
    world
        .get_resource_or_insert_with(ProjectilePools::default)
        .insert(owner, pool);
    true
}

/// Fire the owner's first parked projectile from `start` towards `target`.
///
/// Does nothing (and returns `None`) when the owner has no ammo component, is empty, is
/// still cooling down from the last shot, or has no parked projectile left.
pub fn fire_projectile(world: &mut World, owner: Entity, start: Vec2, target: Vec2) -> Option<Entity> {
    let now = world
        .get_resource::<Time>()
        .map_or(Duration::ZERO, |t| t.elapsed());
    let cooldown = Tunables::current(world).stat_cooldown();

    let ammo = world.get::<Ammo>(owner)?;
    if ammo.current <= 0 || ammo.cooling_down(now, cooldown) {
        return None;
    }

    let pool = world.get_resource::<ProjectilePools>()?.get(owner)?.to_vec();
    let slot = pool.into_iter().find(|&e| {
        world.get_entity(e).is_ok_and(|e| {
            e.contains::<Projectile>()
                && e.contains::<Velocity>()
                && e.contains::<Speed>()
                && e.get::<SimTransform>().is_some_and(|t| !t.active)
        })
    })?;

    let Ok(mut e) = world.get_entity_mut(slot) else {
        return None;
    };
    let speed = e.get::<Speed>().map_or(0.0, |s| s.0);
    if let Some(mut t) = e.get_mut::<SimTransform>() {
        t.active = true;
        t.position = start;
        t.new_position = start;
    }
    if let Some(mut c) = e.get_mut::<Collider>() {
        c.rect = moved_to(c.rect, round_to_grid(start));
    }
    if let Some(mut v) = e.get_mut::<Velocity>() {
        v.0 = (target - start).normalize_or_zero() * speed;
    }

    if let Some(mut ammo) = world.get_mut::<Ammo>(owner) {
        ammo.current -= 1;
        ammo.last_fired = Some(now);
    }

    let sound = world.get::<Audio>(owner).and_then(|a| a.action_sound.clone());
    play_sound(world, sound.as_deref());
    debug!("{owner:?} fired {slot:?}");
    Some(slot)
}

/// Return a projectile to its pool.
///
/// It is parked at its start position offset by the current camera position, so parked
/// projectiles follow the view. Returns `false` for anything that is not a projectile.
pub fn deactivate_projectile(world: &mut World, entity: Entity) -> bool {
    let camera = world
        .get_resource::<CameraState>()
        .map_or(Vec2::ZERO, |c| c.position);
    let Ok(mut e) = world.get_entity_mut(entity) else {
        return false;
    };
    if !e.contains::<Projectile>() {
        return false;
    }

    if let Some(mut v) = e.get_mut::<Velocity>() {
        v.0 = Vec2::ZERO;
    }
    let mut parked = None;
    if let Some(mut t) = e.get_mut::<SimTransform>() {
        let p = t.start_position + camera;
        t.position = p;
        t.new_position = p;
        t.rotation = 0.0;
        t.active = false;
        parked = Some(p);
    }
    if let (Some(p), Some(mut c)) = (parked, e.get_mut::<Collider>()) {
        c.rect = moved_to(c.rect, round_to_grid(p));
    }
    true
}
