//! Game composition root.
//!
//! Provides two ways to run the simulation:
//! - [`Simulation`]: an owned app driven one step at a time by a host loop.
//! - [`configure_headless`]: plugin wiring for apps that tick with `App::update`.

pub mod assets;
pub mod level;

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::math::IRect;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::state::{LevelProgress, PlayerEntity, Score};
use crate::common::tunables::Tunables;
use crate::plugins;
use crate::plugins::assets::audio::{AudioBackend, PlaySound, dispatch_sounds};
use crate::plugins::assets::{ResourceLoader, SoundRegistry, SpriteDesc, SpriteRegistry};
use crate::plugins::camera::camera_position;
use crate::plugins::core::access;
use crate::plugins::level::{
    clear_level_except, is_game_completed, is_level_changing, set_level_changing,
};
use crate::plugins::projectiles::pool::fire_projectile;
use crate::plugins::render::{RenderBackend, render_frame};

use self::level::{LevelSet, load_current_level};

/// Headless configuration: the simulation schedule, run from `Update`.
///
/// Do not add render plugins here; drawing goes through [`Simulation::render`].
pub fn configure_headless(app: &mut App) {
    plugins::register_app(app);
}

/// One running game.
///
/// The host calls, once per frame: input setters, [`Simulation::update`],
/// [`Simulation::render`] and [`Simulation::dispatch_sounds`].
pub struct Simulation {
    app: App,
    levels: Option<LevelSet>,
    rng: StdRng,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_tunables(Tunables::default())
    }

    pub fn with_tunables(tunables: Tunables) -> Self {
        let mut app = App::new();
        app.insert_resource(tunables)
            .insert_resource(Time::<()>::default());
        plugins::register_simulation(&mut app);
        Self { app, levels: None, rng: StdRng::from_entropy() }
    }

    /// Seed the level generator so ground variants and pickup spots repeat.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Install the level layouts and build the current one. Returns the player.
    pub fn start(&mut self, levels: LevelSet) -> Option<Entity> {
        let player = self.player();
        let world = self.app.world_mut();
        let player = load_current_level(world, &levels, player, &mut self.rng);
        world.resource_mut::<PlayerEntity>().0 = player;
        self.levels = Some(levels);
        player
    }

    /// The controlled entity.
    pub fn player(&self) -> Option<Entity> {
        self.world().get_resource::<PlayerEntity>().and_then(|p| p.0)
    }

    /// Advance the simulation by `dt` seconds with `player` as the controlled entity.
    ///
    /// When the step reached an exit the next layout is built before returning.
    pub fn update(&mut self, dt: f32, player: Option<Entity>) {
        let world = self.app.world_mut();
        // Cues older than one frame are dropped if the host never dispatched them.
        if let Some(mut messages) = world.get_resource_mut::<Messages<PlaySound>>() {
            messages.update();
        }
        world.resource_mut::<PlayerEntity>().0 = player;
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(dt.max(0.0)));
        world.run_schedule(plugins::SimUpdate);

        self.load_pending_level();
    }

    fn load_pending_level(&mut self) {
        let world = self.app.world_mut();
        if !is_level_changing(world) {
            return;
        }
        let player = world.get_resource::<PlayerEntity>().and_then(|p| p.0);
        if let Some(levels) = &self.levels {
            let player = load_current_level(world, levels, player, &mut self.rng);
            world.resource_mut::<PlayerEntity>().0 = player;
        }
        set_level_changing(world, false);
    }

    pub fn render(&mut self, backend: &mut dyn RenderBackend, dt: f32) {
        render_frame(self.app.world_mut(), backend, dt);
    }

    pub fn dispatch_sounds(&mut self, backend: &mut dyn AudioBackend) -> usize {
        dispatch_sounds(self.app.world_mut(), backend)
    }

    pub fn set_input(&mut self, entity: Entity, input: Vec2) {
        access::set_entity_input(self.app.world_mut(), entity, input);
    }

    pub fn fire_projectile(&mut self, owner: Entity, start: Vec2, target: Vec2) -> Option<Entity> {
        fire_projectile(self.app.world_mut(), owner, start, target)
    }

    /// Fire from `owner`'s position towards a point on screen.
    pub fn fire_at_screen(&mut self, owner: Entity, screen_target: Vec2) -> Option<Entity> {
        let world = self.app.world_mut();
        let start = access::entity_position(world, owner)?;
        let target = screen_target + camera_position(world);
        fire_projectile(world, owner, start, target)
    }

    /// Empty the world except `keep`. The player reference is dropped if it was removed.
    pub fn clear_level_except(&mut self, keep: Option<Entity>) {
        let world = self.app.world_mut();
        clear_level_except(world, keep);
        let mut player = world.resource_mut::<PlayerEntity>();
        if player.0.is_some() && player.0 != keep {
            player.0 = None;
        }
    }

    pub fn load_sprite(
        &mut self,
        loader: &mut dyn ResourceLoader,
        name: &str,
        path: &str,
        desc: SpriteDesc,
    ) -> bool {
        self.app
            .world_mut()
            .resource_mut::<SpriteRegistry>()
            .load(loader, name, path, desc)
    }

    pub fn load_sound(&mut self, loader: &mut dyn ResourceLoader, name: &str, path: &str) -> bool {
        self.app
            .world_mut()
            .resource_mut::<SoundRegistry>()
            .load(loader, name, path)
    }

    pub fn load_stock_assets(&mut self, loader: &mut dyn ResourceLoader) -> usize {
        assets::load_stock_assets(self.app.world_mut(), loader)
    }

    pub fn score(&self) -> i32 {
        self.world().get_resource::<Score>().map_or(0, |s| s.0)
    }

    pub fn npc_count(&mut self) -> usize {
        access::npc_count(self.app.world_mut())
    }

    pub fn health(&self, entity: Entity) -> Option<i32> {
        access::health(self.world(), entity)
    }

    pub fn ammo(&self, entity: Entity) -> Option<i32> {
        access::ammo(self.world(), entity)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        access::entity_position(self.world(), entity)
    }

    pub fn collider_rect(&self, entity: Entity) -> Option<IRect> {
        access::collider_rect(self.world(), entity)
    }

    pub fn camera_position(&self) -> Vec2 {
        camera_position(self.world())
    }

    pub fn level(&self) -> LevelProgress {
        self.world()
            .get_resource::<LevelProgress>()
            .copied()
            .unwrap_or_default()
    }

    pub fn is_game_completed(&self) -> bool {
        is_game_completed(self.world())
    }
}
