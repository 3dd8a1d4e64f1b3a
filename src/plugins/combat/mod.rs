//! Combat plugin: contact policy, health changes and the death state machine.
//!
//! The collision pass hands every contact to [`handle_contact`]. Deciding what a contact
//! means ([`classify_contact`]) is kept separate from carrying it out ([`apply_contact`]):
//! the first only looks at entity kinds, the second mutates the world.

pub mod death;
pub mod health;

use std::time::Duration;

use bevy::prelude::*;

use crate::common::state::LevelProgress;
use crate::common::tunables::Tunables;
use crate::plugins::assets::audio::play_sound;
use crate::plugins::core::access::npc_count;
use crate::plugins::core::components::{Ammo, Audio, Damage, EntityKind, Health, kind_of};
use crate::plugins::core::lifecycle::destroy_entity;
use crate::plugins::level::clear_level_except;
use crate::plugins::projectiles::pool::deactivate_projectile;
use crate::plugins::{SimSet, SimUpdate};

pub use death::{begin_dying, process_pending_deaths};
pub use health::change_entity_health;

/// What a contact between two entities amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ignore,
    EndLevel { trigger: Entity, player: Entity },
    AmmoPickup { pickup: Entity, collector: Entity },
    /// Damage (or healing, for a negative amount) from `attacker` to `victim`.
    Attack { attacker: Entity, victim: Entity },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Nothing changed.
    Ignored,
    Refilled,
    Exchanged,
    /// Exit reached on the last level with enemies left.
    LevelBlocked,
    GameCompleted,
    /// The world was cleared for the next level.
    LevelAdvanced,
}

/// Decide what a contact means. First match wins:
///
/// 1. exit and player
/// 2. ammo pickup and anything
/// 3. health pickup and enemy: nothing
/// 4. health pickup and anything that `needs_healing`
/// 5. projectile and anything
/// 6. enemy and player
pub fn classify_contact(
    primary: (Entity, EntityKind),
    other: (Entity, EntityKind),
    needs_healing: impl Fn(Entity) -> bool,
) -> Contact {
    use EntityKind as K;
    let ((a, ka), (b, kb)) = (primary, other);

    match (ka, kb) {
        (K::EndLevel, K::Pc) => return Contact::EndLevel { trigger: a, player: b },
        (K::Pc, K::EndLevel) => return Contact::EndLevel { trigger: b, player: a },
        _ => {}
    }
    if ka == K::AmmoPickup {
        return Contact::AmmoPickup { pickup: a, collector: b };
    }
    if kb == K::AmmoPickup {
        return Contact::AmmoPickup { pickup: b, collector: a };
    }
    match (ka, kb) {
        (K::HealthPickup, K::Npc) | (K::Npc, K::HealthPickup) => return Contact::Ignore,
        (K::HealthPickup, _) => {
            return if needs_healing(b) {
                Contact::Attack { attacker: a, victim: b }
            } else {
                Contact::Ignore
            };
        }
        (_, K::HealthPickup) => {
            return if needs_healing(a) {
                Contact::Attack { attacker: b, victim: a }
            } else {
                Contact::Ignore
            };
        }
        _ => {}
    }
    if ka.is_projectile() {
        return Contact::Attack { attacker: a, victim: b };
    }
    if kb.is_projectile() {
        return Contact::Attack { attacker: b, victim: a };
    }
    match (ka, kb) {
        (K::Npc, K::Pc) => Contact::Attack { attacker: a, victim: b },
        (K::Pc, K::Npc) => Contact::Attack { attacker: b, victim: a },
        _ => Contact::Ignore,
    }
}

/// Health strictly below max. Entities without `Health` never need healing.
fn needs_healing(world: &World, entity: Entity) -> bool {
    world.get::<Health>(entity).is_some_and(|h| !h.is_full())
}

/// Classify and apply the contact between `primary` (the mover) and `other`.
pub fn handle_contact(
    world: &mut World,
    primary: Entity,
    other: Entity,
    now: Duration,
) -> ContactOutcome {
    let contact = classify_contact(
        (primary, kind_of(world, primary)),
        (other, kind_of(world, other)),
        |e| needs_healing(world, e),
    );
    apply_contact(world, contact, now)
}

pub fn apply_contact(world: &mut World, contact: Contact, now: Duration) -> ContactOutcome {
    match contact {
        Contact::Ignore => ContactOutcome::Ignored,
        Contact::EndLevel { trigger, player } => reach_exit(world, trigger, player),
        Contact::AmmoPickup { pickup, collector } => collect_ammo(world, pickup, collector),
        Contact::Attack { attacker, victim } => attack(world, attacker, victim, now),
    }
}

fn action_sound(world: &World, entity: Entity) -> Option<String> {
    world.get::<Audio>(entity).and_then(|a| a.action_sound.clone())
}

fn damage_sound(world: &World, entity: Entity) -> Option<String> {
    world.get::<Audio>(entity).and_then(|a| a.damage_sound.clone())
}

fn reach_exit(world: &mut World, trigger: Entity, player: Entity) -> ContactOutcome {
    let sound = action_sound(world, trigger);
    play_sound(world, sound.as_deref());

    let progress = world.get_resource::<LevelProgress>().copied().unwrap_or_default();
    if progress.is_final_level() {
        if npc_count(world) > 0 {
            return ContactOutcome::LevelBlocked;
        }
        if let Some(mut p) = world.get_resource_mut::<LevelProgress>() {
            if !p.completed {
                info!("game completed");
            }
            p.completed = true;
        }
        return ContactOutcome::GameCompleted;
    }

    if let Some(mut p) = world.get_resource_mut::<LevelProgress>() {
        p.current += 1;
        p.changing = true;
        info!("advancing to level {}", p.current);
    }
    clear_level_except(world, Some(player));
    ContactOutcome::LevelAdvanced
}

/// Refill the collector's ammo and consume the pickup. A collector that is already full,
/// or has no ammo at all, leaves the pickup in place.
fn collect_ammo(world: &mut World, pickup: Entity, collector: Entity) -> ContactOutcome {
    let refill = Tunables::current(world).ammo_refill;
    {
        let Some(mut ammo) = world.get_mut::<Ammo>(collector) else {
            return ContactOutcome::Ignored;
        };
        if ammo.current >= ammo.max {
            return ContactOutcome::Ignored;
        }
        ammo.current = (ammo.current + refill).min(ammo.max);
    }
    let sound = action_sound(world, pickup);
    play_sound(world, sound.as_deref());
    destroy_entity(world, pickup);
    ContactOutcome::Refilled
}

fn attack(world: &mut World, attacker: Entity, victim: Entity, now: Duration) -> ContactOutcome {
    let cooldown = Tunables::current(world).stat_cooldown();
    let Some(damage) = world.get::<Damage>(attacker).copied() else {
        return ContactOutcome::Ignored;
    };
    if damage.cooling_down(now, cooldown) {
        return ContactOutcome::Ignored;
    }

    if damage.amount > 0 {
        let sound = damage_sound(world, victim);
        play_sound(world, sound.as_deref());
    }
    let sound = action_sound(world, attacker);
    play_sound(world, sound.as_deref());

    let attacker_kind = kind_of(world, attacker);
    change_entity_health(world, victim, -damage.amount);
    if attacker_kind == EntityKind::Npc {
        // Lifesteal.
        change_entity_health(world, attacker, damage.amount / 2);
    }
    if let Some(mut d) = world.get_mut::<Damage>(attacker) {
        d.last_dealt = Some(now);
    }

    match attacker_kind {
        EntityKind::Projectile { .. } => {
            deactivate_projectile(world, attacker);
        }
        EntityKind::HealthPickup => destroy_entity(world, attacker),
        _ => {}
    }
    ContactOutcome::Exchanged
}

pub fn plugin(app: &mut App) {
    app.add_systems(SimUpdate, process_pending_deaths.in_set(SimSet::Deaths));
}
