//! Feature plugins.
//!
//! Every per-frame system runs in the [`SimUpdate`] schedule, ordered by [`SimSet`]:
//! AI, movement, collision, deaths, the destroy flush and finally animation. The
//! render pass is not a system; it borrows the world once per frame after the update.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

pub mod animation;
pub mod assets;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod level;
pub mod movement;
pub mod projectiles;
pub mod render;

/// One simulation step. Run it with `World::run_schedule`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimUpdate;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Ai,
    Movement,
    Collision,
    Deaths,
    Flush,
    Animation,
}

/// Install the simulation schedule and every simulation plugin.
pub fn register_simulation(app: &mut App) {
    app.init_schedule(SimUpdate);
    app.configure_sets(
        SimUpdate,
        (
            SimSet::Ai,
            SimSet::Movement,
            SimSet::Collision,
            SimSet::Deaths,
            SimSet::Flush,
            SimSet::Animation,
        )
            .chain(),
    );

    core::plugin(app);
    assets::plugin(app);
    level::plugin(app);
    projectiles::plugin(app);
    enemies::plugin(app);
    movement::plugin(app);
    collision::plugin(app);
    combat::plugin(app);
    animation::plugin(app);
}

/// Drive [`SimUpdate`] from the app's `Update` schedule.
pub fn run_simulation(world: &mut World) {
    world.run_schedule(SimUpdate);
}

/// `register_simulation` plus a runner, for apps that tick with `App::update`.
pub fn register_app(app: &mut App) {
    register_simulation(app);
    app.add_systems(Update, run_simulation);
}
