//! Chase AI tests.

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{run_system_once, sim_world};
use crate::plugins::core::components::Pc;
use crate::plugins::core::lifecycle::create_entity;

fn unit(world: &mut World, position: Vec2) -> Entity {
    let e = create_entity(world);
    world.entity_mut(e).insert(SimTransform::at(position));
    e
}

fn enemy(world: &mut World, position: Vec2) -> Entity {
    let e = unit(world, position);
    world.entity_mut(e).insert((Npc, MoveInput::default()));
    e
}

fn input_of(world: &World, e: Entity) -> Vec2 {
    world.get::<MoveInput>(e).map(|i| i.0).unwrap_or(Vec2::splat(f32::NAN))
}

#[test]
fn chase_input_is_unit_length_inside_range() {
    let v = chase_input(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0), 256.0 * 256.0);
    assert!((v - Vec2::new(0.6, 0.8)).length() < 1e-6);
}

#[test]
fn chase_input_stops_when_colocated_or_out_of_range() {
    let range_sq = 256.0 * 256.0;
    assert_eq!(chase_input(Vec2::splat(5.0), Vec2::splat(5.0), range_sq), Vec2::ZERO);
    assert_eq!(chase_input(Vec2::ZERO, Vec2::new(257.0, 0.0), range_sq), Vec2::ZERO);
    // The boundary itself still chases.
    assert_eq!(chase_input(Vec2::ZERO, Vec2::new(256.0, 0.0), range_sq), Vec2::X);
}

#[test]
fn enemies_steer_towards_player() {
    let mut world = sim_world();
    let player = unit(&mut world, Vec2::new(100.0, 0.0));
    world.entity_mut(player).insert(Pc);
    world.resource_mut::<PlayerEntity>().0 = Some(player);

    let near = enemy(&mut world, Vec2::new(0.0, 0.0));
    let far = enemy(&mut world, Vec2::new(1000.0, 0.0));
    world.entity_mut(far).insert(MoveInput(Vec2::ONE));

    run_system_once(&mut world, chase_player);

    assert_eq!(input_of(&world, near), Vec2::X);
    assert_eq!(input_of(&world, far), Vec2::ZERO);
}

#[test]
fn no_player_leaves_inputs_untouched() {
    let mut world = sim_world();
    let npc = enemy(&mut world, Vec2::ZERO);
    world.entity_mut(npc).insert(MoveInput(Vec2::Y));

    run_system_once(&mut world, chase_player);
    assert_eq!(input_of(&world, npc), Vec2::Y);

    // A player id that does not resolve to a transform is the same as no player.
    let ghost = create_entity(&mut world);
    world.resource_mut::<PlayerEntity>().0 = Some(ghost);
    run_system_once(&mut world, chase_player);
    assert_eq!(input_of(&world, npc), Vec2::Y);
}

#[test]
fn dying_and_inactive_enemies_stand_still() {
    let mut world = sim_world();
    let player = unit(&mut world, Vec2::new(50.0, 0.0));
    world.resource_mut::<PlayerEntity>().0 = Some(player);

    let dying = enemy(&mut world, Vec2::ZERO);
    world.entity_mut(dying).insert((Dying, MoveInput(Vec2::X)));
    let parked = enemy(&mut world, Vec2::ZERO);
    world.get_mut::<SimTransform>(parked).unwrap().active = false;

    run_system_once(&mut world, chase_player);

    assert_eq!(input_of(&world, dying), Vec2::ZERO);
    assert_eq!(input_of(&world, parked), Vec2::ZERO);
}

#[test]
fn missing_input_is_inserted() {
    let mut world = sim_world();
    let player = unit(&mut world, Vec2::new(0.0, 10.0));
    world.resource_mut::<PlayerEntity>().0 = Some(player);

    let bare = unit(&mut world, Vec2::ZERO);
    world.entity_mut(bare).insert(Npc);

    run_system_once(&mut world, chase_player);
    assert_eq!(input_of(&world, bare), Vec2::Y);
}
