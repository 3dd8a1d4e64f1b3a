//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `arena_sim::game::configure_headless` installs the simulation plugins.
//!
//! Scenario tests drive an `arena_sim::game::Simulation` with fixed steps instead.

#![allow(dead_code)]

use arena_sim::game::Simulation;
use arena_sim::game::level::{LevelGrid, LevelSet};
use bevy::prelude::*;

pub const STEP: f32 = 0.1;

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    arena_sim::game::configure_headless(&mut app);
    app
}

/// A single open row `len` tiles long with the given codes placed.
pub fn row(len: usize, cells: &[(usize, u8)]) -> LevelGrid {
    let mut tiles = vec![0; len];
    for &(col, code) in cells {
        tiles[col] = code;
    }
    LevelGrid::new(vec![tiles])
}

/// Levels without scattered pickups, so runs are deterministic.
pub fn levels(grids: Vec<LevelGrid>) -> LevelSet {
    LevelSet { levels: grids, ammo_pickups: 0, health_pickups: 0 }
}

/// A seeded simulation with `levels` loaded. Returns it with the player.
pub fn started(levels: LevelSet) -> (Simulation, Entity) {
    let mut sim = Simulation::new().with_seed(42);
    let player = sim.start(levels).expect("level has a player start");
    (sim, player)
}

/// Step until `done` holds or `max_frames` have run. Returns the frames taken.
pub fn run_until(
    sim: &mut Simulation,
    player: Entity,
    max_frames: usize,
    mut done: impl FnMut(&mut Simulation) -> bool,
) -> Option<usize> {
    for frame in 1..=max_frames {
        sim.update(STEP, Some(player));
        if done(sim) {
            return Some(frame);
        }
    }
    None
}
