//! Collision plugin: axis-separated sweep against every other active collider.
//!
//! Each mover (active, with `Velocity` and `Collider`) probes its tentative X position
//! against a snapshot of the other colliders, then its tentative Y position with X already
//! committed. The first obstacle hit on an axis is handed to the contact policy; unless
//! either side is a trigger the mover is pushed flush against the obstacle and its
//! velocity on that axis is zeroed.
//!
//! ```text
//!   probe X (new.x, pos.y) ──hit──> policy ──solid──> push to edge, stop axis
//!          │                           └──trigger──> keep scanning
//!          v
//!   commit X, probe Y (pos.x, new.y) ... commit Y, sync collider
//! ```

use std::time::Duration;

use bevy::math::{BVec2, IRect, IVec2};
use bevy::prelude::*;

use crate::common::geometry::{intersects, moved_to, rect_at, round_to_grid};
use crate::plugins::combat::{ContactOutcome, handle_contact};
use crate::plugins::core::components::{
    Collider, EntityId, EntityKind, PendingDestroy, Projectile, SimTransform, Velocity, kind_of,
};
use crate::plugins::{SimSet, SimUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy)]
struct Obstacle {
    entity: Entity,
    rect: IRect,
    kind: EntityKind,
}

/// How the sweep of one axis ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Clear,
    Blocked,
    /// The mover was parked or removed by the policy.
    MoverGone,
    /// The level was cleared; nothing from the old level may be touched.
    LevelChanged,
}

/// Edge a blocked mover is pushed to: the near side when moving in the positive
/// direction, otherwise the far side.
#[inline]
pub fn push_out(velocity: f32, extent: i32, obstacle_min: i32, obstacle_max: i32) -> f32 {
    if velocity > 0.0 {
        (obstacle_min - extent) as f32
    } else {
        obstacle_max as f32
    }
}

/// True if `a` is the projectile fired by `b`, or the other way round.
fn projectile_pairing(a: Option<&Projectile>, a_id: Entity, b: Option<&Projectile>, b_id: Entity) -> bool {
    a.is_some_and(|p| p.owner == b_id) || b.is_some_and(|p| p.owner == a_id)
}

fn sort_key(world: &World, e: Entity) -> (u64, Entity) {
    (world.get::<EntityId>(e).map_or(u64::MAX, |id| id.0), e)
}

fn movers(world: &mut World) -> Vec<Entity> {
    let mut all: Vec<Entity> = world
        .query_filtered::<(Entity, &SimTransform), (With<Velocity>, With<Collider>, Without<PendingDestroy>)>()
        .iter(world)
        .filter(|(_, t)| t.active)
        .map(|(e, _)| e)
        .collect();
    all.sort_by_key(|&e| sort_key(world, e));
    all
}

/// Every other active collider the mover can touch, in serial order.
fn obstacles_for(world: &mut World, mover: Entity) -> Vec<Obstacle> {
    let mover_projectile = world.get::<Projectile>(mover).copied();
    let mut found: Vec<(Entity, IRect)> = world
        .query_filtered::<(Entity, &Collider, &SimTransform, Option<&Projectile>), Without<PendingDestroy>>()
        .iter(world)
        .filter(|(e, _, t, p)| {
            *e != mover
                && t.active
                && !projectile_pairing(mover_projectile.as_ref(), mover, *p, *e)
        })
        .map(|(e, c, _, _)| (e, c.rect))
        .collect();
    found.sort_by_key(|&(e, _)| sort_key(world, e));
    found
        .into_iter()
        .map(|(entity, rect)| Obstacle { entity, rect, kind: kind_of(world, entity) })
        .collect()
}

/// Still able to take part in this frame's pass.
fn in_play(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_ok_and(|e| {
        !e.contains::<PendingDestroy>() && e.get::<SimTransform>().is_some_and(|t| t.active)
    })
}

struct MoverState {
    entity: Entity,
    kind: EntityKind,
    position: Vec2,
    new_position: Vec2,
    velocity: Vec2,
    extent: IVec2,
}

impl MoverState {
    fn probe(&self, axis: Axis) -> IRect {
        let at = match axis {
            Axis::X => Vec2::new(self.new_position.x, self.position.y),
            Axis::Y => Vec2::new(self.position.x, self.new_position.y),
        };
        rect_at(round_to_grid(at), self.extent)
    }
}

fn sweep_axis(
    world: &mut World,
    mover: &mut MoverState,
    obstacles: &[Obstacle],
    axis: Axis,
    now: Duration,
) -> Sweep {
    let probe = mover.probe(axis);
    for obstacle in obstacles {
        if !intersects(&probe, &obstacle.rect) || !in_play(world, obstacle.entity) {
            continue;
        }
        let outcome = handle_contact(world, mover.entity, obstacle.entity, now);
        if outcome == ContactOutcome::LevelAdvanced {
            return Sweep::LevelChanged;
        }
        if !in_play(world, mover.entity) {
            return Sweep::MoverGone;
        }
        if mover.kind.is_trigger() || obstacle.kind.is_trigger() {
            continue;
        }

        match axis {
            Axis::X => {
                mover.new_position.x =
                    push_out(mover.velocity.x, mover.extent.x, obstacle.rect.min.x, obstacle.rect.max.x);
                mover.velocity.x = 0.0;
            }
            Axis::Y => {
                mover.new_position.y =
                    push_out(mover.velocity.y, mover.extent.y, obstacle.rect.min.y, obstacle.rect.max.y);
                mover.velocity.y = 0.0;
            }
        }
        return Sweep::Blocked;
    }
    Sweep::Clear
}

/// Resolve one mover. Returns `false` when the rest of the pass must be abandoned.
fn resolve_mover(world: &mut World, entity: Entity, now: Duration) -> bool {
    if !in_play(world, entity) {
        return true;
    }
    let (Some(t), Some(c), Some(v)) = (
        world.get::<SimTransform>(entity),
        world.get::<Collider>(entity),
        world.get::<Velocity>(entity),
    ) else {
        return true;
    };
    let mut mover = MoverState {
        entity,
        kind: kind_of(world, entity),
        position: t.position,
        new_position: t.new_position,
        velocity: v.0,
        extent: c.rect.size(),
    };
    let obstacles = obstacles_for(world, entity);

    let mut blocked = BVec2::FALSE;
    for axis in [Axis::X, Axis::Y] {
        match sweep_axis(world, &mut mover, &obstacles, axis, now) {
            Sweep::LevelChanged => return false,
            Sweep::MoverGone => return true,
            Sweep::Blocked if axis == Axis::X => blocked.x = true,
            Sweep::Blocked => blocked.y = true,
            Sweep::Clear => {}
        }
        match axis {
            Axis::X => mover.position.x = mover.new_position.x,
            Axis::Y => mover.position.y = mover.new_position.y,
        }
    }

    let Ok(mut e) = world.get_entity_mut(entity) else {
        return true;
    };
    if let Some(mut t) = e.get_mut::<SimTransform>() {
        t.position = mover.position;
        t.new_position = mover.new_position;
    }
    if let Some(mut c) = e.get_mut::<Collider>() {
        c.rect = moved_to(c.rect, round_to_grid(mover.position));
    }
    // Contacts may have changed the velocity (e.g. a parked projectile); only the
    // blocked axes are zeroed here.
    if let Some(mut v) = e.get_mut::<Velocity>() {
        if blocked.x {
            v.0.x = 0.0;
        }
        if blocked.y {
            v.0.y = 0.0;
        }
    }
    true
}

/// The collision pass. Commits every mover's position for the frame.
pub fn resolve_collisions(world: &mut World) {
    let now = world
        .get_resource::<Time>()
        .map_or(Duration::ZERO, |t| t.elapsed());
    for mover in movers(world) {
        if !resolve_mover(world, mover, now) {
            debug!("collision pass stopped: level changed");
            return;
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(SimUpdate, resolve_collisions.in_set(SimSet::Collision));
}
