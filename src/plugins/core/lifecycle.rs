//! Entity lifecycle: id allocation, deferred destruction, flush.
//!
//! Destruction is two-phase. `destroy_entity` only marks (`PendingDestroy`); the
//! `flush_destroyed` system evicts every marked entity once per frame after the
//! gameplay systems have run, so no system ever iterates a half-removed entity.
//! Level clearing needs the world empty *now* and uses `flush_destroyed_now`.

use bevy::prelude::*;

use super::components::{EntityId, PendingDestroy};

#[derive(Resource, Debug, Clone, Copy)]
pub struct EntityAllocator {
    next: u64,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityAllocator {
    #[inline]
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    #[inline]
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// Spawn an empty simulation entity carrying a fresh serial.
pub fn create_entity(world: &mut World) -> Entity {
    let id = world.get_resource_or_insert_with(EntityAllocator::default).allocate();
    world.spawn(id).id()
}

/// Queue an entity for removal at the end of the frame. Idempotent.
pub fn destroy_entity(world: &mut World, entity: Entity) {
    if let Ok(mut e) = world.get_entity_mut(entity) {
        e.insert(PendingDestroy);
    }
}

/// End-of-frame flush: despawn everything marked `PendingDestroy`.
pub fn flush_destroyed(mut commands: Commands, q: Query<Entity, With<PendingDestroy>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

/// Synchronous flush for callers that cannot wait for the end of the frame.
pub fn flush_destroyed_now(world: &mut World) -> usize {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, With<PendingDestroy>>()
        .iter(world)
        .collect();
    for &e in &doomed {
        world.despawn(e);
    }
    if !doomed.is_empty() {
        debug!("flushed {} destroyed entities", doomed.len());
    }
    doomed.len()
}

/// Every simulation entity, in serial order.
pub fn live_entities(world: &mut World) -> Vec<Entity> {
    let mut all: Vec<(EntityId, Entity)> = world
        .query::<(&EntityId, Entity)>()
        .iter(world)
        .map(|(id, e)| (*id, e))
        .collect();
    all.sort_unstable_by_key(|(id, _)| *id);
    all.into_iter().map(|(_, e)| e).collect()
}

#[inline]
pub fn is_live(world: &World, entity: Entity) -> bool {
    world.get::<EntityId>(entity).is_some()
}
