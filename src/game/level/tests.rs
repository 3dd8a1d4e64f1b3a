use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::common::state::{LevelProgress, WorldBounds};
use crate::common::test_utils::sim_world;
use crate::plugins::core::access::{collider_rect, entity_position, npc_count};
use crate::plugins::core::components::{AmmoPickup, EndLevel, HealthPickup, Pc};
use crate::plugins::level::GroundTiles;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn walled_room() -> LevelGrid {
    LevelGrid::new(vec![
        vec![1, 1, 1, 1],
        vec![1, 2, 3, 1],
        vec![1, 10, 4, 1],
        vec![1, 1, 1, 1],
    ])
}

fn count_with<T: Component>(world: &mut World) -> usize {
    world.query_filtered::<(), With<T>>().iter(world).count()
}

#[test]
fn tile_codes() {
    assert_eq!(TileCode::from_code(1), Some(TileCode::Block));
    assert_eq!(TileCode::from_code(10), Some(TileCode::Exit));
    assert_eq!(TileCode::from_code(0), None);
    assert_eq!(TileCode::from_code(7), None);
}

#[test]
fn grid_dimensions_use_the_widest_row() {
    let grid = LevelGrid::new(vec![vec![0, 0], vec![0, 0, 0]]);
    assert_eq!(grid.dimensions(), IVec2::new(3, 2));
    assert_eq!(LevelGrid::default().dimensions(), IVec2::ZERO);
}

#[test]
fn build_spawns_every_code_on_top_of_ground() {
    let mut world = sim_world();
    let player = build_level(&mut world, &walled_room(), None, &mut rng());

    let player = player.expect("player spawned");
    assert_eq!(entity_position(&world, player), Some(Vec2::new(16.0, 16.0)));
    assert_eq!(npc_count(&mut world), 1);
    assert_eq!(count_with::<EndLevel>(&mut world), 1);
    assert_eq!(world.resource::<WorldBounds>().size, Vec2::new(64.0, 64.0));

    // One ground tile per cell plus the road on top of its cell.
    let tiles = &world.resource::<GroundTiles>().0;
    assert_eq!(tiles.len(), 17);
    assert!(
        tiles
            .iter()
            .any(|t| t.sprite == "road" && t.position == IVec2::new(32, 32))
    );
    assert!(
        tiles
            .iter()
            .filter(|t| t.sprite != "road")
            .all(|t| GROUND_VARIANTS.contains(&t.sprite.as_str()))
    );
}

#[test]
fn existing_player_is_moved_not_respawned() {
    let mut world = sim_world();
    let player = spawn_player(&mut world, Vec2::new(300.0, 300.0));

    let built = build_level(&mut world, &walled_room(), Some(player), &mut rng());

    assert_eq!(built, Some(player));
    assert_eq!(count_with::<Pc>(&mut world), 1);
    assert_eq!(entity_position(&world, player), Some(Vec2::new(16.0, 16.0)));
    assert_eq!(collider_rect(&world, player).unwrap().min, IVec2::new(16, 16));
}

#[test]
fn grid_without_start_keeps_no_player() {
    let mut world = sim_world();
    let grid = LevelGrid::new(vec![vec![0, 3]]);
    assert_eq!(build_level(&mut world, &grid, None, &mut rng()), None);
}

#[test]
fn scattered_items_avoid_walls_and_each_other() {
    let mut world = sim_world();
    let mut occupied = vec![rect_at(IVec2::new(16, 16), IVec2::new(64, 64))];

    let placed = scatter_items(
        &mut world,
        6,
        IVec2::new(160, 160),
        &mut occupied,
        &mut rng(),
        spawn_ammo_pickup,
    );

    assert!(placed > 0);
    assert_eq!(occupied.len(), 1 + placed);
    assert_eq!(count_with::<AmmoPickup>(&mut world), placed);
    for (i, a) in occupied.iter().enumerate() {
        assert!(a.min.x >= 16 && a.min.y >= 16);
        assert!(a.min.x <= 144 && a.min.y <= 144);
        for b in &occupied[i + 1..] {
            assert!(!intersects(a, b));
        }
    }
}

#[test]
fn scatter_gives_up_when_there_is_no_room() {
    let mut world = sim_world();
    let mut occupied = Vec::new();
    let placed = scatter_items(
        &mut world,
        3,
        IVec2::new(16, 16),
        &mut occupied,
        &mut rng(),
        spawn_health_pickup,
    );
    assert_eq!(placed, 0);

    // Every spot is taken.
    let mut occupied = vec![rect_at(IVec2::ZERO, IVec2::new(160, 160))];
    let placed = scatter_items(
        &mut world,
        3,
        IVec2::new(160, 160),
        &mut occupied,
        &mut rng(),
        spawn_health_pickup,
    );
    assert_eq!(placed, 0);
    assert_eq!(count_with::<HealthPickup>(&mut world), 0);
}

#[test]
fn level_set_from_ron_uses_default_pickup_counts() {
    let set = LevelSet::from_ron_str("(levels: [[[1, 2], [3, 10]]])").unwrap();
    assert_eq!(set.levels, vec![LevelGrid::new(vec![vec![1, 2], vec![3, 10]])]);
    assert_eq!((set.ammo_pickups, set.health_pickups), (5, 3));

    assert!(LevelSet::from_ron_str("(levels: 3)").is_err());
    assert!(matches!(
        LevelSet::load_from_file("levels.json"),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn load_current_level_records_count_and_scatters_pickups() {
    let mut world = sim_world();
    let mut big = vec![vec![0; 12]; 12];
    big[1][1] = 2;
    let levels = LevelSet {
        levels: vec![LevelGrid::new(big), walled_room()],
        ammo_pickups: 2,
        health_pickups: 1,
    };

    let player = load_current_level(&mut world, &levels, None, &mut rng());

    assert!(player.is_some());
    assert_eq!(world.resource::<LevelProgress>().count, 2);
    assert_eq!(count_with::<AmmoPickup>(&mut world), 2);
    assert_eq!(count_with::<HealthPickup>(&mut world), 1);
}

#[test]
fn missing_layout_keeps_the_player() {
    let mut world = sim_world();
    world.resource_mut::<LevelProgress>().current = 4;
    let levels = LevelSet::new(vec![walled_room()]);
    let player = spawn_player(&mut world, Vec2::ZERO);

    assert_eq!(load_current_level(&mut world, &levels, Some(player), &mut rng()), Some(player));
    assert_eq!(npc_count(&mut world), 0);
}
