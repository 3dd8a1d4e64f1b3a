//! The stock sprite and sound set.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::assets::{ResourceLoader, SoundRegistry, SpriteDesc, SpriteRegistry};

/// One stock sprite: name, path, start frame, frame count, looping, scale.
pub struct StockSprite {
    pub name: &'static str,
    pub path: &'static str,
    pub start: u32,
    pub count: u32,
    pub looping: bool,
    pub scale: f32,
}

const fn clip(name: &'static str, path: &'static str, start: u32, count: u32, looping: bool) -> StockSprite {
    StockSprite { name, path, start, count, looping, scale: 1.0 }
}

const fn still(name: &'static str, path: &'static str) -> StockSprite {
    clip(name, path, 0, 1, true)
}

pub const STOCK_SPRITES: &[StockSprite] = &[
    clip("player_idle_down", "res/player_walk_sheet.png", 0, 1, false),
    clip("player_idle_right", "res/player_walk_sheet.png", 3, 1, false),
    clip("player_idle_up", "res/player_walk_sheet.png", 6, 1, false),
    clip("player_walk_down", "res/player_walk_sheet.png", 0, 3, true),
    clip("player_walk_right", "res/player_walk_sheet.png", 3, 3, true),
    clip("player_walk_up", "res/player_walk_sheet.png", 6, 3, true),
    clip("player_death_down", "res/player_death_sheet.png", 0, 3, false),
    clip("player_death_right", "res/player_death_sheet.png", 3, 3, false),
    clip("player_death_up", "res/player_death_sheet.png", 6, 3, false),
    clip("zombie_idle_down", "res/zombie_walk_sheet.png", 0, 1, false),
    clip("zombie_idle_right", "res/zombie_walk_sheet.png", 3, 1, false),
    clip("zombie_idle_up", "res/zombie_walk_sheet.png", 6, 1, false),
    clip("zombie_walk_down", "res/zombie_walk_sheet.png", 0, 3, true),
    clip("zombie_walk_right", "res/zombie_walk_sheet.png", 3, 3, true),
    clip("zombie_walk_up", "res/zombie_walk_sheet.png", 6, 3, true),
    clip("zombie_death_down", "res/zombie_death_sheet.png", 0, 3, false),
    clip("zombie_death_right", "res/zombie_death_sheet.png", 3, 3, false),
    clip("zombie_death_up", "res/zombie_death_sheet.png", 6, 3, false),
    still("ground", "res/ground.png"),
    still("ground2", "res/ground2.png"),
    still("ground3", "res/ground3.png"),
    still("ground4", "res/ground4.png"),
    still("road", "res/road.png"),
    still("roadH", "res/roadH.png"),
    still("roadV", "res/roadV.png"),
    still("block", "res/wall.png"),
    StockSprite { scale: 0.5, ..clip("bullet", "res/bullet.png", 0, 1, false) },
    still("healthPickUp", "res/health.png"),
    still("ammoPickup", "res/ammo.png"),
    still("endLevel", "res/endLevel.png"),
];

pub const STOCK_SOUNDS: &[(&str, &str)] = &[
    ("shoot", "res/sfx/shoot.wav"),
    ("zombie_hit_sound", "res/sfx/zombie_hit.wav"),
    ("player_hit_sound", "res/sfx/player_death.wav"),
    ("heal_sound", "res/sfx/heal_sound.wav"),
    ("ammo_sound", "res/sfx/ammo.wav"),
    ("endLevel_sound", "res/sfx/endLevel_sound.wav"),
];

/// Register every stock sprite and sound through `loader`. Returns how many were stored;
/// failures are logged by the registries and skipped.
pub fn load_stock_assets(world: &mut World, loader: &mut dyn ResourceLoader) -> usize {
    let tile = Tunables::current(world).entity_size;
    let mut loaded = 0;

    let mut sprites = world.get_resource_or_insert_with(SpriteRegistry::default);
    for s in STOCK_SPRITES {
        let desc = SpriteDesc::new(tile, tile)
            .frames(s.start, s.count)
            .looping(s.looping)
            .scale(s.scale);
        loaded += usize::from(sprites.load(loader, s.name, s.path, desc));
    }

    let mut sounds = world.get_resource_or_insert_with(SoundRegistry::default);
    for (name, path) in STOCK_SOUNDS {
        loaded += usize::from(sounds.load(loader, name, path));
    }
    info!("stock assets: {loaded} registered");
    loaded
}
