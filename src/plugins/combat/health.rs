use bevy::prelude::*;

use crate::plugins::core::components::Health;

use super::death::begin_dying;

/// Add a signed amount to an entity's health.
///
/// The result is clamped to `max`. Reaching zero or below pins health at zero and starts
/// the death sequence (once). Returns the new health, or `None` without a `Health`.
pub fn change_entity_health(world: &mut World, entity: Entity, amount: i32) -> Option<i32> {
    let current = {
        let mut health = world.get_mut::<Health>(entity)?;
        health.current = health.current.saturating_add(amount);
        if health.current <= 0 {
            health.current = 0;
        } else if health.current > health.max {
            health.current = health.max;
        }
        health.current
    };
    if current == 0 {
        begin_dying(world, entity);
    }
    Some(current)
}
