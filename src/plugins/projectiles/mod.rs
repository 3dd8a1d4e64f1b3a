//! Projectiles plugin: pooled shots.
//!
//! # Lifecycle
//! ```text
//!   init_projectile_pool          fire_projectile                  collision contact
//!   (owner spawn / level load)    (glue, between updates)          (attacker = projectile)
//!  ┌────────────────────────┐   ┌──────────────────────────┐   ┌──────────────────────────┐
//!  │ N entities, inactive,  │──▶│ first inactive slot:     │──▶│ deactivate_projectile:   │
//!  │ parked off-screen      │   │ active, at start,        │   │ velocity 0, parked at    │
//!  │                        │◀──│ velocity towards target  │   │ start + camera, inactive │
//!  └────────────────────────┘   └──────────────────────────┘   └──────────────────────────┘
//!              ▲                                                           │
//!              └───────────────────────────────────────────────────────────┘
//! ```
//! A projectile never collides with its owner. Inactive projectiles are skipped by the
//! movement, collision and render passes.

pub mod pool;

use bevy::prelude::*;

pub use pool::{ProjectilePools, deactivate_projectile, fire_projectile, init_projectile_pool};

pub fn plugin(app: &mut App) {
    app.init_resource::<ProjectilePools>();
}

#[cfg(test)]
mod tests;
