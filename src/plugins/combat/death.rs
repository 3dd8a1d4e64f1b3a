//! Death state machine: Alive -> Dying -> finalized.
//!
//! `Dying` is present only while the death clip plays. Once the clip reaches its last
//! frame (or immediately, without an `Animation`) the entity is finalized: the player
//! respawns at its start position, an enemy pays out its score and is queued for removal.

use bevy::prelude::*;

use crate::common::geometry::{moved_to, round_to_grid};
use crate::common::state::Score;
use crate::common::tunables::Tunables;
use crate::plugins::assets::sprite_frames;
use crate::plugins::core::components::{
    Animation, AnimationState, Collider, Dying, EntityKind, Health, ScoreValue, SimTransform,
    kind_of,
};
use crate::plugins::core::lifecycle::destroy_entity;

/// Enter the dying state. Returns `false` if the entity was already dying or is gone.
pub fn begin_dying(world: &mut World, entity: Entity) -> bool {
    let Ok(mut e) = world.get_entity_mut(entity) else {
        return false;
    };
    if e.contains::<Dying>() {
        return false;
    }
    e.insert(Dying);

    let Some(clip) = e
        .get::<AnimationState>()
        .map(|s| s.death.get(s.facing).to_owned())
    else {
        debug!("{entity:?} dying without death clips");
        return true;
    };
    if e.get::<Animation>().is_none() {
        return true;
    }

    let (frames, _) = sprite_frames(world, &clip);
    let fallback = Tunables::current(world).frame_duration;
    if let Some(mut anim) = world.get_mut::<Animation>(entity) {
        anim.repoint(clip.as_str(), frames, false);
        if anim.frame_duration <= 0.0 {
            anim.frame_duration = fallback;
        }
    }
    debug!("{entity:?} dying, playing {clip:?}");
    true
}

/// True once a dying entity may be finalized.
#[inline]
fn death_finished(anim: Option<&Animation>) -> bool {
    anim.is_none_or(Animation::is_finished)
}

/// Finalize every dying entity whose death clip has finished.
pub fn process_pending_deaths(world: &mut World) {
    let ready: Vec<Entity> = world
        .query_filtered::<(Entity, Option<&Animation>), With<Dying>>()
        .iter(world)
        .filter(|(_, anim)| death_finished(*anim))
        .map(|(e, _)| e)
        .collect();
    for e in ready {
        finalize_death(world, e);
    }
}

pub fn finalize_death(world: &mut World, entity: Entity) {
    let kind = kind_of(world, entity);
    let Ok(mut e) = world.get_entity_mut(entity) else {
        return;
    };
    e.remove::<Dying>();

    match kind {
        EntityKind::Pc => {
            let mut start = None;
            if let Some(mut t) = e.get_mut::<SimTransform>() {
                let p = t.start_position;
                t.position = p;
                t.new_position = p;
                start = Some(p);
            }
            if let (Some(p), Some(mut c)) = (start, e.get_mut::<Collider>()) {
                c.rect = moved_to(c.rect, round_to_grid(p));
            }
            if let Some(mut h) = e.get_mut::<Health>() {
                h.current = h.max;
            }
            debug!("player {entity:?} respawned");
        }
        EntityKind::Npc => {
            let value = e.get::<ScoreValue>().map(|s| s.0);
            let points = value.unwrap_or_else(|| Tunables::current(world).default_score);
            if let Some(mut score) = world.get_resource_mut::<Score>() {
                score.0 += points;
            }
            destroy_entity(world, entity);
            debug!("enemy {entity:?} died, +{points}");
        }
        _ => {
            // Only units are expected to die; anything else is removed without a payout.
            destroy_entity(world, entity);
        }
    }
}
