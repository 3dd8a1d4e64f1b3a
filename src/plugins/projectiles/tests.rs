use bevy::prelude::*;

use super::*;
use crate::common::state::CameraState;
use crate::common::test_utils::{advance_time, drain_sounds, register_sounds, sheet, sim_world};
use crate::common::tunables::Tunables;
use crate::plugins::assets::{SpriteRegistry, SpriteSheet};
use crate::plugins::core::access::ammo;
use crate::plugins::core::components::{Ammo, Collider, Damage, Projectile, SimTransform, Velocity};
use crate::plugins::core::lifecycle::create_entity;
use crate::plugins::core::spawn::spawn_player;

fn active_shots(world: &World, owner: Entity) -> Vec<Entity> {
    world
        .resource::<ProjectilePools>()
        .get(owner)
        .unwrap()
        .iter()
        .copied()
        .filter(|&e| world.get::<SimTransform>(e).unwrap().active)
        .collect()
}

#[test]
fn pool_is_parked_and_carries_owner_damage() {
    let mut world = sim_world();
    let owner = create_entity(&mut world);
    world.entity_mut(owner).insert(Damage::new(7));

    assert!(init_projectile_pool(&mut world, owner, 3));
    assert!(!init_projectile_pool(&mut world, owner, 3));

    let pool = world.resource::<ProjectilePools>().get(owner).unwrap().to_vec();
    assert_eq!(pool.len(), 3);
    let park = Tunables::default().park_position();
    for e in pool {
        assert_eq!(world.get::<Projectile>(e).unwrap().owner, owner);
        assert_eq!(world.get::<Damage>(e).unwrap().amount, 7);
        let t = world.get::<SimTransform>(e).unwrap();
        assert!(!t.active);
        assert_eq!(t.position, park);
    }
}

#[test]
fn pool_collider_follows_projectile_sprite_scale() {
    let mut world = sim_world();
    world
        .resource_mut::<SpriteRegistry>()
        .insert("bullet", SpriteSheet { scale: 0.5, ..sheet(1, true) });
    let owner = create_entity(&mut world);

    init_projectile_pool(&mut world, owner, 1);
    let shot = world.resource::<ProjectilePools>().get(owner).unwrap()[0];
    assert_eq!(world.get::<Collider>(shot).unwrap().rect.size(), IVec2::new(8, 8));
    assert_eq!(world.get::<SimTransform>(shot).unwrap().scale, 0.5);
    assert_eq!(world.get::<Damage>(shot).unwrap().amount, Tunables::default().default_damage);
}

#[test]
fn last_round_fires_east_then_nothing() {
    let mut world = sim_world();
    register_sounds(&mut world, &["shoot"]);
    let pc = spawn_player(&mut world, Vec2::ZERO);
    world.get_mut::<Ammo>(pc).unwrap().current = 1;

    let start = Vec2::new(10.0, 20.0);
    let shot = fire_projectile(&mut world, pc, start, Vec2::new(110.0, 20.0)).unwrap();

    let speed = Tunables::default().projectile_speed;
    assert_eq!(world.get::<Velocity>(shot).unwrap().0, Vec2::new(speed, 0.0));
    let t = world.get::<SimTransform>(shot).unwrap();
    assert_eq!((t.position, t.new_position), (start, start));
    assert_eq!(world.get::<Collider>(shot).unwrap().rect.min, IVec2::new(10, 20));
    assert_eq!(ammo(&world, pc), Some(0));
    assert_eq!(drain_sounds(&mut world), vec!["shoot".to_owned()]);

    assert_eq!(fire_projectile(&mut world, pc, start, Vec2::new(110.0, 20.0)), None);
    assert_eq!(active_shots(&world, pc), vec![shot]);
}

#[test]
fn cooldown_blocks_rapid_fire() {
    let mut world = sim_world();
    let pc = spawn_player(&mut world, Vec2::ZERO);

    assert!(fire_projectile(&mut world, pc, Vec2::ZERO, Vec2::X).is_some());
    advance_time(&mut world, 0.1);
    assert!(fire_projectile(&mut world, pc, Vec2::ZERO, Vec2::X).is_none());
    assert_eq!(ammo(&world, pc), Some(24));

    advance_time(&mut world, 0.2);
    assert!(fire_projectile(&mut world, pc, Vec2::ZERO, Vec2::X).is_some());
    assert_eq!(active_shots(&world, pc).len(), 2);
}

#[test]
fn owner_without_ammo_or_pool_cannot_fire() {
    let mut world = sim_world();
    let bare = create_entity(&mut world);
    init_projectile_pool(&mut world, bare, 2);
    assert!(fire_projectile(&mut world, bare, Vec2::ZERO, Vec2::X).is_none());

    let no_pool = create_entity(&mut world);
    world.entity_mut(no_pool).insert(Ammo::new(5, 10));
    assert!(fire_projectile(&mut world, no_pool, Vec2::ZERO, Vec2::X).is_none());
    assert_eq!(ammo(&world, no_pool), Some(5));
}

#[test]
fn exhausted_pool_refuses_to_fire() {
    let mut world = sim_world();
    let owner = create_entity(&mut world);
    world.entity_mut(owner).insert(Ammo::new(10, 10));
    init_projectile_pool(&mut world, owner, 1);

    assert!(fire_projectile(&mut world, owner, Vec2::ZERO, Vec2::X).is_some());
    advance_time(&mut world, 1.0);
    assert!(fire_projectile(&mut world, owner, Vec2::ZERO, Vec2::X).is_none());
    assert_eq!(ammo(&world, owner), Some(9));
}

#[test]
fn deactivate_parks_relative_to_camera() {
    let mut world = sim_world();
    let pc = spawn_player(&mut world, Vec2::ZERO);
    let shot = fire_projectile(&mut world, pc, Vec2::new(50.0, 50.0), Vec2::new(50.0, 0.0)).unwrap();
    world.get_mut::<SimTransform>(shot).unwrap().rotation = 90.0;
    world.resource_mut::<CameraState>().position = Vec2::new(100.0, 40.0);

    assert!(deactivate_projectile(&mut world, shot));

    let expected = Tunables::default().park_position() + Vec2::new(100.0, 40.0);
    let t = world.get::<SimTransform>(shot).unwrap();
    assert!(!t.active);
    assert_eq!(t.position, expected);
    assert_eq!(t.rotation, 0.0);
    assert_eq!(world.get::<Velocity>(shot).unwrap().0, Vec2::ZERO);
    assert!(active_shots(&world, pc).is_empty());

    // Parked slots are reused.
    advance_time(&mut world, 1.0);
    assert_eq!(fire_projectile(&mut world, pc, Vec2::ZERO, Vec2::X), Some(shot));
}

#[test]
fn deactivate_rejects_non_projectiles() {
    let mut world = sim_world();
    let pc = spawn_player(&mut world, Vec2::new(5.0, 5.0));
    assert!(!deactivate_projectile(&mut world, pc));
    assert!(world.get::<SimTransform>(pc).unwrap().active);
}
