//! Core plugin: component store, entity lifecycle and shared simulation resources.

pub mod access;
pub mod components;
pub mod lifecycle;
pub mod spawn;

use bevy::prelude::*;

use crate::common::state::{CameraState, LevelProgress, PlayerEntity, Score, WorldBounds};
use crate::common::tunables::Tunables;
use crate::plugins::{SimSet, SimUpdate};

pub fn plugin(app: &mut App) {
    // `init_resource` keeps tunables inserted before the plugin runs.
    app.init_resource::<Tunables>()
        .init_resource::<lifecycle::EntityAllocator>()
        .init_resource::<PlayerEntity>()
        .init_resource::<Score>()
        .init_resource::<LevelProgress>()
        .init_resource::<CameraState>()
        .init_resource::<WorldBounds>();

    app.add_systems(SimUpdate, lifecycle::flush_destroyed.in_set(SimSet::Flush));
}

#[cfg(test)]
mod tests;
