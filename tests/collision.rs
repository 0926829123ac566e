use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use glam::Vec2;
use speculoos::prelude::*;

use forest_runner::audio::Cue;
use forest_runner::constants::mechanics;
use forest_runner::events::AudioEvent;
use forest_runner::systems::bundles::{
    AnimalBundle, FruitBundle, ObstacleBundle, PowerUpBundle,
};
use forest_runner::systems::collision::collision_system;
use forest_runner::systems::components::{
    AnimalKind, BoostKind, BoostTimers, EntityKind, FruitColor, PlayerLives, Position,
    ScoreResource,
};

mod common;

/// Moves the player on top of the given world position.
fn place_player_at(world: &mut World, player: bevy_ecs::entity::Entity, x: f32, y: f32) {
    world
        .entity_mut(player)
        .get_mut::<Position>()
        .expect("Player has a position")
        .0 = Vec2::new(x, y);
}

#[test]
fn test_fruit_collection_scores_and_despawns() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    world.spawn(FruitBundle::new(300.0, 440.0, FruitColor::Red));
    place_player_at(&mut world, player, 295.0, 420.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(12); // 10 + level 1 * 2

    let mut fruits = world.query::<&EntityKind>();
    let remaining = fruits
        .iter(&world)
        .filter(|kind| matches!(kind, EntityKind::Fruit(_)))
        .count();
    assert_that(&remaining).is_equal_to(0);

    let events = common::drain_audio_events(&mut world);
    assert_that(&events).contains(AudioEvent::Play(Cue::Collect));
}

#[test]
fn test_distant_fruit_is_untouched() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);

    world.spawn(FruitBundle::new(700.0, 440.0, FruitColor::Yellow));

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);

    let mut fruits = world.query::<&EntityKind>();
    let remaining = fruits
        .iter(&world)
        .filter(|kind| matches!(kind, EntityKind::Fruit(_)))
        .count();
    assert_that(&remaining).is_equal_to(1);
}

#[test]
fn test_speed_power_up_grants_boost() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    world.spawn(PowerUpBundle::new(300.0, 440.0, BoostKind::Speed));
    place_player_at(&mut world, player, 295.0, 420.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(25);

    let mut query = world.query::<&BoostTimers>();
    let boosts = query.single(&world).expect("Player should exist");
    assert_that(&boosts.speed).is_equal_to(mechanics::SPEED_BOOST_TICKS);
}

#[test]
fn test_repeat_speed_power_up_resets_timer() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    // Burn through part of an active speed boost first.
    {
        let mut player_entity = world.entity_mut(player);
        let mut boosts = player_entity
            .get_mut::<BoostTimers>()
            .expect("Player has boost timers");
        boosts.grant_speed();
        for _ in 0..250 {
            boosts.tick();
        }
    }

    world.spawn(PowerUpBundle::new(300.0, 440.0, BoostKind::Speed));
    place_player_at(&mut world, player, 295.0, 420.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    // The second pickup resets the countdown; durations never stack.
    let mut query = world.query::<&BoostTimers>();
    let boosts = query.single(&world).expect("Player should exist");
    assert_that(&boosts.speed).is_equal_to(mechanics::SPEED_BOOST_TICKS);
}

#[test]
fn test_extra_life_power_up_respects_cap() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);
    world.insert_resource(PlayerLives(mechanics::MAX_LIVES));

    world.spawn(PowerUpBundle::new(300.0, 440.0, BoostKind::ExtraLife));
    place_player_at(&mut world, player, 295.0, 420.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::MAX_LIVES);
}

#[test]
fn test_obstacle_hit_costs_a_life() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    world.spawn(ObstacleBundle::new(300.0));
    place_player_at(&mut world, player, 295.0, 430.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::STARTING_LIVES - 1);

    let mut query = world.query::<&BoostTimers>();
    let boosts = query.single(&world).expect("Player should exist");
    assert_that(&boosts.invulnerability).is_equal_to(mechanics::DAMAGE_SHIELD_TICKS);

    let events = common::drain_audio_events(&mut world);
    assert_that(&events).contains(AudioEvent::Play(Cue::Hit));
}

#[test]
fn test_active_shield_blocks_damage() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);
    world
        .entity_mut(player)
        .get_mut::<BoostTimers>()
        .expect("Player has boost timers")
        .grant_shield();

    world.spawn(AnimalBundle::new(300.0, AnimalKind::Bear, 1));
    place_player_at(&mut world, player, 295.0, 430.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::STARTING_LIVES);

    let events = common::drain_audio_events(&mut world);
    assert_that(&events.contains(&AudioEvent::Play(Cue::Hit))).is_false();
}

#[test]
fn test_obstacle_and_animal_can_both_hit_in_one_tick() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    world.spawn(ObstacleBundle::new(300.0));
    world.spawn(AnimalBundle::new(300.0, AnimalKind::Wolf, 1));
    place_player_at(&mut world, player, 295.0, 430.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::STARTING_LIVES - 2);
}

#[test]
fn test_two_obstacles_cost_only_one_life() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    world.spawn(ObstacleBundle::new(300.0));
    world.spawn(ObstacleBundle::new(305.0));
    place_player_at(&mut world, player, 295.0, 430.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::STARTING_LIVES - 1);
}

#[test]
fn test_shield_collected_this_tick_blocks_damage() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    // The power-up pass runs before the damage passes, so a shield picked
    // up in the same tick already protects.
    world.spawn(PowerUpBundle::new(300.0, 440.0, BoostKind::Invulnerability));
    world.spawn(AnimalBundle::new(300.0, AnimalKind::Fox, 1));
    place_player_at(&mut world, player, 295.0, 430.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::STARTING_LIVES);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(25);
}

#[test]
fn test_touching_edges_are_not_a_collision() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    // Fruit exactly flush with the player's right edge.
    let fruit_x = 295.0 + forest_runner::constants::body::PLAYER.x;
    world.spawn(FruitBundle::new(fruit_x, 430.0, FruitColor::Pink));
    place_player_at(&mut world, player, 295.0, 430.0);

    world
        .run_system_once(collision_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
}
