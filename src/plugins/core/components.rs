//! Simulation components.
//!
//! Every attribute kind is its own component; an entity is nothing more than the set
//! of components stored under its id. Kind (player, enemy, pickup, ...) is never stored:
//! it is derived from tag presence through [`kind_of`].

use std::time::Duration;

use bevy::math::IRect;
use bevy::prelude::*;

use crate::common::layers::RenderLayer;

/// Monotonic serial handed out by [`super::lifecycle::create_entity`].
///
/// Serials are never reissued, which gives the collision and render passes a stable,
/// deterministic order independent of storage layout.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

#[derive(Component, Debug, Clone, PartialEq)]
pub struct SimTransform {
    /// Spawn point; the player respawns here and pooled projectiles park relative to it.
    pub start_position: Vec2,
    /// Committed position. Only the collision pass writes it during a frame.
    pub position: Vec2,
    /// Tentative position proposed by movement for this frame.
    pub new_position: Vec2,
    pub scale: f32,
    pub rotation: f32,
    /// The source art faces left, so "facing right" means drawing it flipped.
    pub initial_flip_h: bool,
    pub flip_h: bool,
    /// Inactive entities exist but take no part in collision or AI targeting.
    pub active: bool,
    pub layer: RenderLayer,
}

impl SimTransform {
    pub fn at(position: Vec2) -> Self {
        Self {
            start_position: position,
            position,
            new_position: position,
            scale: 1.0,
            rotation: 0.0,
            initial_flip_h: false,
            flip_h: false,
            active: true,
            layer: RenderLayer::Object,
        }
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Art that faces the other way; also applied as the initial render flip.
    pub fn flipped(mut self) -> Self {
        self.initial_flip_h = true;
        self.flip_h = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Move start, committed and tentative positions together.
    pub fn relocate(&mut self, position: Vec2) {
        self.start_position = position;
        self.position = position;
        self.new_position = position;
    }
}

/// Recomputed every frame from [`MoveInput`] where present.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

/// Steering request in the range [-1, 1] per axis (player keys or AI).
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveInput(pub Vec2);

/// Axis-aligned collision box in integer world units.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub rect: IRect,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Contact damage. A negative amount heals the victim.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: i32,
    pub last_dealt: Option<Duration>,
}

impl Damage {
    pub fn new(amount: i32) -> Self {
        Self { amount, last_dealt: None }
    }

    /// True while the last hit is younger than `cooldown`.
    #[inline]
    pub fn cooling_down(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_dealt.is_some_and(|t| now.saturating_sub(t) < cooldown)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ammo {
    pub current: i32,
    pub max: i32,
    pub last_fired: Option<Duration>,
}

impl Ammo {
    pub fn new(current: i32, max: i32) -> Self {
        Self { current, max, last_fired: None }
    }

    #[inline]
    pub fn cooling_down(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_fired.is_some_and(|t| now.saturating_sub(t) < cooldown)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

/// Name of the base sprite in the sprite registry.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SpriteRef(pub String);

/// Per-entity playback cursor into a named sprite.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    pub looping: bool,
    pub frame_count: u32,
    pub frame_duration: f32,
    pub timer: f32,
    pub current_frame: u32,
}

impl Animation {
    pub fn new(name: impl Into<String>, frame_count: u32, frame_duration: f32) -> Self {
        Self {
            name: name.into(),
            looping: true,
            frame_count,
            frame_duration,
            timer: 0.0,
            current_frame: 0,
        }
    }

    /// Point at another sprite and restart from its first frame.
    pub fn repoint(&mut self, name: impl Into<String>, frame_count: u32, looping: bool) {
        self.name = name.into();
        self.frame_count = frame_count;
        self.looping = looping;
        self.timer = 0.0;
        self.current_frame = 0;
    }

    /// A non-looping animation that has reached its last frame.
    #[inline]
    pub fn is_finished(&self) -> bool {
        !self.looping && self.frame_count > 0 && self.current_frame + 1 >= self.frame_count
    }
}

/// Last direction an entity walked in. Left is drawn as a flipped `Right`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Right,
    #[default]
    Down,
}

/// Idle / walk / death sprite names for each facing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectionalSet {
    pub up: String,
    pub right: String,
    pub down: String,
}

impl DirectionalSet {
    pub fn new(down: impl Into<String>, right: impl Into<String>, up: impl Into<String>) -> Self {
        Self { up: up.into(), right: right.into(), down: down.into() }
    }

    /// Sprite names following the `<prefix>_<action>_<dir>` convention.
    pub fn named(prefix: &str, action: &str) -> Self {
        Self::new(
            format!("{prefix}_{action}_down"),
            format!("{prefix}_{action}_right"),
            format!("{prefix}_{action}_up"),
        )
    }

    #[inline]
    pub fn get(&self, facing: Facing) -> &str {
        match facing {
            Facing::Up => &self.up,
            Facing::Right => &self.right,
            Facing::Down => &self.down,
        }
    }
}

#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct AnimationState {
    pub idle: DirectionalSet,
    pub walk: DirectionalSet,
    pub death: DirectionalSet,
    /// Idle and death pick the clip matching the last walk direction.
    pub facing: Facing,
}

impl AnimationState {
    pub fn for_prefix(prefix: &str) -> Self {
        Self {
            idle: DirectionalSet::named(prefix, "idle"),
            walk: DirectionalSet::named(prefix, "walk"),
            death: DirectionalSet::named(prefix, "death"),
            facing: Facing::Down,
        }
    }
}

/// Sound names resolved against the sound registry when played.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct Audio {
    /// Played when this entity takes damage.
    pub damage_sound: Option<String>,
    /// Played when this entity attacks, fires or is picked up.
    pub action_sound: Option<String>,
}

impl Audio {
    pub fn new(damage_sound: Option<&str>, action_sound: Option<&str>) -> Self {
        Self {
            damage_sound: damage_sound.map(str::to_owned),
            action_sound: action_sound.map(str::to_owned),
        }
    }
}

/// Points granted when this entity finishes dying.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreValue(pub i32);

#[derive(Component, Debug, Clone, Copy)]
pub struct Pc;

#[derive(Component, Debug, Clone, Copy)]
pub struct Npc;

#[derive(Component, Debug, Clone, Copy)]
pub struct AmmoPickup;

#[derive(Component, Debug, Clone, Copy)]
pub struct HealthPickup;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub owner: Entity,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct EndLevel;

/// Draw a health bar over this entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct HealthBar;

/// Death animation in progress. Absent on living entities.
#[derive(Component, Debug, Clone, Copy)]
#[component(storage = "SparseSet")]
pub struct Dying;

/// Marked for removal; evicted at the end of the frame.
#[derive(Component, Debug, Clone, Copy)]
#[component(storage = "SparseSet")]
pub struct PendingDestroy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Pc,
    Npc,
    AmmoPickup,
    HealthPickup,
    Projectile { owner: Entity },
    EndLevel,
    Unknown,
}

impl EntityKind {
    #[inline]
    pub fn is_projectile(self) -> bool {
        matches!(self, Self::Projectile { .. })
    }

    /// Triggers fire contact effects but never physically block.
    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, Self::Projectile { .. } | Self::EndLevel)
    }
}

/// Classify an entity by its tags. Order matters when tags overlap; missing entities
/// are `Unknown`.
pub fn kind_of(world: &World, entity: Entity) -> EntityKind {
    let Ok(e) = world.get_entity(entity) else {
        return EntityKind::Unknown;
    };
    if e.contains::<Pc>() {
        EntityKind::Pc
    } else if e.contains::<Npc>() {
        EntityKind::Npc
    } else if e.contains::<AmmoPickup>() {
        EntityKind::AmmoPickup
    } else if e.contains::<HealthPickup>() {
        EntityKind::HealthPickup
    } else if let Some(p) = e.get::<Projectile>() {
        EntityKind::Projectile { owner: p.owner }
    } else if e.contains::<EndLevel>() {
        EntityKind::EndLevel
    } else {
        EntityKind::Unknown
    }
}
