//! Enemies plugin: proximity chase.
//!
//! Every enemy within chase range of the controlled unit steers straight at it; everything
//! else stands still. The AI only writes `MoveInput`. Movement turns that into velocity.

use bevy::prelude::*;

use crate::common::state::PlayerEntity;
use crate::common::tunables::Tunables;
use crate::plugins::core::components::{Dying, MoveInput, Npc, SimTransform};
use crate::plugins::{SimSet, SimUpdate};

/// Unit vector from `from` towards `to` when `to` lies within the chase radius.
///
/// Co-located units stop instead of dividing by zero.
#[inline]
pub fn chase_input(from: Vec2, to: Vec2, range_sq: f32) -> Vec2 {
    let delta = to - from;
    let dist_sq = delta.length_squared();
    if dist_sq > 0.0 && dist_sq <= range_sq {
        delta / dist_sq.sqrt()
    } else {
        Vec2::ZERO
    }
}

/// Steer enemies at the controlled unit.
///
/// Enemies that are dying or inactive receive a zero input. Enemies without a
/// `MoveInput` get one inserted.
pub fn chase_player(
    mut commands: Commands,
    player: Res<PlayerEntity>,
    tunables: Res<Tunables>,
    targets: Query<&SimTransform>,
    mut npcs: Query<(Entity, &SimTransform, Option<&mut MoveInput>, Has<Dying>), With<Npc>>,
) {
    let Some(player) = player.0 else {
        return;
    };
    let Ok(target) = targets.get(player) else {
        return;
    };
    let target = target.position;
    let range_sq = tunables.chase_range_sq();

    for (e, transform, input, dying) in &mut npcs {
        let steer = if dying || !transform.active {
            Vec2::ZERO
        } else {
            chase_input(transform.position, target, range_sq)
        };
        match input {
            Some(mut input) => input.0 = steer,
            None => {
                commands.entity(e).insert(MoveInput(steer));
            }
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(SimUpdate, chase_player.in_set(SimSet::Ai));
}

#[cfg(test)]
mod tests;
