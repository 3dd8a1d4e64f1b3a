//! Animation plugin: clip selection from movement, then frame advance.
//!
//! `Animation` is a per-entity cursor into a named sprite sheet. Selection re-points the
//! cursor when the wanted clip changes; advance only ticks the cursor.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::assets::{SpriteRegistry, sprite_frames};
use crate::plugins::core::components::{
    Animation, AnimationState, Dying, Facing, SimTransform, SpriteRef, Velocity,
};
use crate::plugins::{SimSet, SimUpdate};

/// Clip wanted for a velocity, updating `facing` and the render flip while moving.
///
/// Horizontal motion wins when `|vx| > |vy|` and always uses the right-facing clip;
/// walking left is the same clip mirrored (taking the art's own flip into account).
pub fn select_clip(state: &mut AnimationState, transform: &mut SimTransform, velocity: Vec2) -> String {
    if velocity == Vec2::ZERO {
        return state.idle.get(state.facing).to_owned();
    }
    if velocity.x.abs() > velocity.y.abs() {
        state.facing = Facing::Right;
        let moving_right = velocity.x > 0.0;
        transform.flip_h = transform.initial_flip_h == moving_right;
    } else if velocity.y > 0.0 {
        state.facing = Facing::Down;
    } else {
        state.facing = Facing::Up;
    }
    state.walk.get(state.facing).to_owned()
}

/// Re-point every living animated entity at the clip its movement calls for.
pub fn select_animation_states(
    sprites: Option<Res<SpriteRegistry>>,
    tunables: Res<Tunables>,
    mut q: Query<
        (&mut AnimationState, &mut Animation, &Velocity, &mut SimTransform),
        Without<Dying>,
    >,
) {
    for (mut state, mut anim, velocity, mut transform) in &mut q {
        let clip = select_clip(&mut state, &mut transform, velocity.0);
        if anim.name == clip {
            continue;
        }
        let (frames, looping) = sprites
            .as_deref()
            .and_then(|r| r.get(&clip))
            .map_or((1, true), |s| (s.frame_count, s.looping));
        anim.repoint(clip, frames, looping);
        anim.frame_duration = tunables.frame_duration;
    }
}

/// Step a cursor by `dt`. Looping clips wrap; others hold their last frame.
pub fn step_animation(anim: &mut Animation, dt: f32, fallback_duration: f32) {
    let frame_duration = if anim.frame_duration > 0.0 {
        anim.frame_duration
    } else {
        fallback_duration
    };
    anim.timer += dt;
    while anim.timer >= frame_duration {
        anim.timer -= frame_duration;
        anim.current_frame += 1;
        if anim.current_frame >= anim.frame_count {
            anim.current_frame = if anim.looping {
                0
            } else {
                anim.frame_count.saturating_sub(1)
            };
        }
    }
}

pub fn advance_animations(time: Res<Time>, tunables: Res<Tunables>, mut q: Query<&mut Animation>) {
    let dt = time.delta_secs();
    let fallback = tunables.frame_duration.max(f32::EPSILON);
    for mut anim in &mut q {
        step_animation(&mut anim, dt, fallback);
    }
}

/// Show the registered sprite `name` on `entity`, restarting its animation cursor.
///
/// Returns `false` (and changes nothing) when the sprite is unknown.
pub fn attach_sprite(world: &mut World, entity: Entity, name: &str) -> bool {
    let known = world
        .get_resource::<SpriteRegistry>()
        .is_some_and(|r| r.contains(name));
    if !known {
        return false;
    }
    let (frames, _) = sprite_frames(world, name);
    let frame_duration = Tunables::current(world).frame_duration;
    let Ok(mut e) = world.get_entity_mut(entity) else {
        return false;
    };

    e.insert(SpriteRef(name.to_owned()));
    if let Some(mut anim) = e.get_mut::<Animation>() {
        let looping = anim.looping;
        anim.repoint(name, frames, looping);
        return true;
    }
    e.insert(Animation::new(name, frames, frame_duration));
    true
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        SimUpdate,
        (select_animation_states, advance_animations)
            .chain()
            .in_set(SimSet::Animation),
    );
}
