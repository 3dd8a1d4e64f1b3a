//! Tunable gameplay constants.
//!
//! `Default` carries the stock values; a RON file can override any subset of them
//! (missing fields fall back to the defaults).

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Speed used when an entity with input has no `Speed` component.
    pub default_speed: f32,
    pub player_speed: f32,
    pub projectile_speed: f32,
    pub default_max_health: i32,
    pub default_damage: i32,
    pub default_ammo: i32,
    pub default_max_ammo: i32,
    pub player_damage: i32,
    pub heal_amount: i32,
    /// Chase radius in world units (compared squared).
    pub npc_chase_range: f32,
    /// Shared cooldown for damage exchanges and firing.
    pub stat_cooldown_ms: u64,
    pub ammo_refill: i32,
    pub default_score: i32,
    pub projectiles_per_owner: usize,
    pub projectile_sprite: String,
    /// Where pooled projectiles rest, relative to the camera.
    pub park_x: f32,
    pub park_y: f32,
    pub camera_smoothing: f32,
    /// Height of the HUD bands at the top and bottom of the screen.
    pub hud_band: f32,
    pub frame_duration: f32,
    pub entity_size: i32,
    pub sfx_volume: i32,
    pub bar_height: i32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            default_speed: 100.0,
            player_speed: 200.0,
            projectile_speed: 400.0,
            default_max_health: 100,
            default_damage: 10,
            default_ammo: 10,
            default_max_ammo: 50,
            player_damage: 25,
            heal_amount: 25,
            npc_chase_range: 256.0,
            stat_cooldown_ms: 250,
            ammo_refill: 10,
            default_score: 10,
            projectiles_per_owner: 20,
            projectile_sprite: "bullet".into(),
            park_x: -1000.0,
            park_y: -1000.0,
            camera_smoothing: 5.0,
            hud_band: 48.0,
            frame_duration: 0.1,
            entity_size: 16,
            sfx_volume: 64,
            bar_height: 4,
        }
    }
}

impl Tunables {
    /// Snapshot of the world's tunables, or the defaults when none are installed.
    pub fn current(world: &World) -> Self {
        world.get_resource::<Self>().cloned().unwrap_or_default()
    }

    #[inline]
    pub fn entity_extent(&self) -> IVec2 {
        IVec2::splat(self.entity_size)
    }

    #[inline]
    pub fn stat_cooldown(&self) -> Duration {
        Duration::from_millis(self.stat_cooldown_ms)
    }

    #[inline]
    pub fn chase_range_sq(&self) -> f32 {
        self.npc_chase_range * self.npc_chase_range
    }

    #[inline]
    pub fn park_position(&self) -> Vec2 {
        Vec2::new(self.park_x, self.park_y)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load tunables from a `.ron` file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
