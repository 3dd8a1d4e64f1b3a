use bevy::prelude::*;

use crate::common::state::{LevelProgress, PlayerEntity, Score};
use crate::common::test_utils::{run_system_once, sim_world};
use crate::common::tunables::Tunables;
use crate::plugins::core;
use crate::plugins::core::access::*;
use crate::plugins::core::components::*;
use crate::plugins::core::lifecycle::*;
use crate::plugins::core::spawn::*;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<EntityAllocator>().is_some());
    assert!(app.world().get_resource::<PlayerEntity>().is_some());
    assert_eq!(app.world().resource::<Score>().0, 0);
    assert_eq!(app.world().resource::<LevelProgress>().count, 1);
}

#[test]
fn plugin_keeps_preinstalled_tunables() {
    let mut app = App::new();
    app.insert_resource(Tunables { player_speed: 1.0, ..Default::default() });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().player_speed, 1.0);
}

#[test]
fn serials_are_never_reissued() {
    let mut world = sim_world();
    let a = create_entity(&mut world);
    let b = create_entity(&mut world);
    assert_eq!(world.get::<EntityId>(a), Some(&EntityId(1)));
    assert_eq!(world.get::<EntityId>(b), Some(&EntityId(2)));

    destroy_entity(&mut world, a);
    flush_destroyed_now(&mut world);
    let c = create_entity(&mut world);
    assert_eq!(world.get::<EntityId>(c), Some(&EntityId(3)));
    assert_eq!(world.resource::<EntityAllocator>().peek(), 4);
    assert_eq!(live_entities(&mut world), vec![b, c]);
}

#[test]
fn destroy_is_deferred_and_idempotent() {
    let mut world = sim_world();
    let e = create_entity(&mut world);
    world.entity_mut(e).insert((Health::new(5, 5), Velocity::default()));

    destroy_entity(&mut world, e);
    destroy_entity(&mut world, e);
    assert!(is_live(&world, e));
    assert_eq!(health(&world, e), Some(5));

    run_system_once(&mut world, flush_destroyed);
    assert!(!is_live(&world, e));
    assert_eq!(health(&world, e), None);
    assert_eq!(flush_destroyed_now(&mut world), 0);

    // Destroying something already gone is harmless.
    destroy_entity(&mut world, e);
}

#[test]
fn kind_follows_tag_priority() {
    let mut world = sim_world();
    let owner = create_entity(&mut world);
    let e = create_entity(&mut world);

    assert_eq!(kind_of(&world, e), EntityKind::Unknown);
    world.entity_mut(e).insert(EndLevel);
    assert_eq!(kind_of(&world, e), EntityKind::EndLevel);
    world.entity_mut(e).insert(Projectile { owner });
    assert_eq!(kind_of(&world, e), EntityKind::Projectile { owner });
    world.entity_mut(e).insert(Npc);
    assert_eq!(kind_of(&world, e), EntityKind::Npc);
    world.entity_mut(e).insert(Pc);
    assert_eq!(kind_of(&world, e), EntityKind::Pc);

    world.despawn(e);
    assert_eq!(kind_of(&world, e), EntityKind::Unknown);
}

#[test]
fn input_is_clamped_per_axis() {
    let mut world = sim_world();
    let e = create_entity(&mut world);

    set_entity_input(&mut world, e, Vec2::new(3.0, -0.5));
    assert_eq!(world.get::<MoveInput>(e).unwrap().0, Vec2::new(1.0, -0.5));
    set_entity_input(&mut world, e, Vec2::new(-7.0, -7.0));
    assert_eq!(world.get::<MoveInput>(e).unwrap().0, Vec2::NEG_ONE);
}

#[test]
fn teleport_moves_every_position_and_the_collider() {
    let mut world = sim_world();
    let pc = spawn_player(&mut world, Vec2::ZERO);

    set_entity_position(&mut world, pc, Vec2::new(40.4, 80.6));

    let t = world.get::<SimTransform>(pc).unwrap();
    let p = Vec2::new(40.4, 80.6);
    assert_eq!((t.start_position, t.position, t.new_position), (p, p, p));
    assert_eq!(collider_rect(&world, pc).unwrap().min, IVec2::new(40, 81));
    assert_eq!(entity_position(&world, pc), Some(p));
}

#[test]
fn getters_report_absence() {
    let mut world = sim_world();
    let e = create_entity(&mut world);
    assert_eq!(entity_position(&world, e), None);
    assert_eq!(collider_rect(&world, e), None);
    assert_eq!(health(&world, e), None);
    assert_eq!(ammo(&world, e), None);
}

#[test]
fn stock_bundles() {
    let mut world = sim_world();
    let pc = spawn_player(&mut world, Vec2::ZERO);
    let npc = spawn_enemy(&mut world, Vec2::new(32.0, 0.0));
    let heal = spawn_health_pickup(&mut world, Vec2::new(64.0, 0.0));
    let exit = spawn_end_level(&mut world, Vec2::new(96.0, 0.0));

    assert_eq!(health(&world, pc), Some(100));
    assert_eq!(ammo(&world, pc), Some(25));
    assert_eq!(world.get::<Damage>(pc).unwrap().amount, 25);
    assert_eq!(world.get::<Speed>(pc).unwrap().0, 200.0);
    assert!(world.get::<HealthBar>(pc).is_some());

    assert_eq!(health(&world, npc), Some(50));
    assert_eq!(world.get::<Damage>(npc).unwrap().amount, 10);
    assert_eq!(world.get::<ScoreValue>(npc).unwrap().0, 10);
    assert!(world.get::<SimTransform>(npc).unwrap().initial_flip_h);

    assert_eq!(world.get::<Damage>(heal).unwrap().amount, -25);
    assert_eq!(kind_of(&world, exit), EntityKind::EndLevel);
    assert_eq!(
        world.get::<SimTransform>(exit).unwrap().layer,
        crate::common::layers::RenderLayer::Ground
    );
    assert_eq!(collider_rect(&world, exit).unwrap().size(), IVec2::splat(16));
}

#[test]
fn npc_count_skips_doomed_enemies() {
    let mut world = sim_world();
    let a = spawn_enemy(&mut world, Vec2::ZERO);
    spawn_enemy(&mut world, Vec2::new(32.0, 0.0));
    assert_eq!(npc_count(&mut world), 2);

    destroy_entity(&mut world, a);
    assert_eq!(npc_count(&mut world), 1);
}
