//! Movement plugin: input to velocity, velocity to a proposed position.
//!
//! Movement never commits a position. It writes `SimTransform::new_position` and the
//! collision pass decides what actually happens.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core::components::{MoveInput, SimTransform, Speed, Velocity};
use crate::plugins::{SimSet, SimUpdate};

/// Scale a steering request by `speed`. Magnitudes above one are normalized; smaller
/// analog magnitudes pass through.
#[inline]
pub fn steer_velocity(input: Vec2, speed: f32) -> Vec2 {
    let len = input.length();
    let dir = if len > 1.0 { input / len } else { input };
    dir * speed
}

/// Recompute velocity from input for every entity that has one.
pub fn apply_move_input(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &MoveInput, Option<&Speed>, Option<&mut Velocity>)>,
) {
    for (e, input, speed, velocity) in &mut q {
        let speed = speed.map_or(tunables.default_speed, |s| s.0);
        let v = steer_velocity(input.0, speed);
        match velocity {
            Some(mut velocity) => velocity.0 = v,
            None => {
                commands.entity(e).insert(Velocity(v));
            }
        }
    }
}

/// Propose `position + velocity * dt` for every active transform.
pub fn propose_positions(time: Res<Time>, mut q: Query<(&Velocity, &mut SimTransform)>) {
    let dt = time.delta_secs();
    for (velocity, mut transform) in &mut q {
        if !transform.active {
            continue;
        }
        transform.new_position = transform.position + velocity.0 * dt;
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        SimUpdate,
        (apply_move_input, propose_positions)
            .chain()
            .in_set(SimSet::Movement),
    );
}
