//! Global simulation state.
//!
//! Everything here is a resource on the simulation `World`, so two simulations never
//! share score, camera or level bookkeeping.

use bevy::prelude::*;

/// The entity the player controls. `None` means no player has been spawned.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerEntity(pub Option<Entity>);

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub i32);

/// Level-transition bookkeeping.
///
/// `changing` is raised by the end-level trigger after the world has been cleared; the
/// caller reloads the next level and lowers it again.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub current: usize,
    pub count: usize,
    pub changing: bool,
    pub completed: bool,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self { current: 0, count: 1, changing: false, completed: false }
    }
}

impl LevelProgress {
    #[inline]
    pub fn is_final_level(&self) -> bool {
        self.current + 1 >= self.count
    }
}

/// Top-left corner of the view, in world units.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec2,
}

/// Size of the playable world in world units.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub size: Vec2,
}

impl WorldBounds {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }
}
