use bevy_ecs::event::Events;
use bevy_ecs::system::RunSystemOnce;
use speculoos::prelude::*;

use forest_runner::audio::Cue;
use forest_runner::constants::mechanics;
use forest_runner::events::{flush_events, AudioEvent, GameCommand, GameEvent};
use forest_runner::systems::components::{
    CurrentLevel, EntityKind, GlobalState, PlayerLives, Position, ScoreResource,
};
use forest_runner::systems::stage::{game_over, level_progress, stage_system, GameStage};

mod common;

#[test]
fn test_start_command_begins_run() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);

    common::send_game_event(&mut world, GameEvent::Command(GameCommand::Start));
    world
        .run_system_once(stage_system)
        .expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Running);

    let events = common::drain_audio_events(&mut world);
    assert_that(&events).contains(AudioEvent::StartMusic);
}

#[test]
fn test_start_while_running_is_a_no_op() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);
    world.insert_resource(GameStage::Running);
    world.insert_resource(ScoreResource(300));

    common::send_game_event(&mut world, GameEvent::Command(GameCommand::Start));
    world
        .run_system_once(stage_system)
        .expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Running);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(300);
}

#[test]
fn test_exit_command_sets_exit_flag() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);

    common::send_game_event(&mut world, GameEvent::Command(GameCommand::Exit));
    world
        .run_system_once(stage_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_restart_resets_the_run() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);
    world.insert_resource(GameStage::GameOver);
    world.insert_resource(ScoreResource(870));
    world.insert_resource(CurrentLevel(6));
    world.insert_resource(PlayerLives(0));

    common::send_game_event(&mut world, GameEvent::Command(GameCommand::Start));
    world
        .run_system_once(stage_system)
        .expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Running);
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(0);
    assert_that(&world.resource::<CurrentLevel>().0).is_equal_to(1);
    assert_that(&world.resource::<PlayerLives>().0).is_equal_to(mechanics::STARTING_LIVES);

    // A fresh level 1 layout was spawned.
    let mut query = world.query::<&EntityKind>();
    let fruit_count = query
        .iter(&world)
        .filter(|kind| matches!(kind, EntityKind::Fruit(_)))
        .count();
    assert_that(&fruit_count).is_equal_to(13);

    let mut player_query =
        world.query_filtered::<&Position, bevy_ecs::query::With<forest_runner::systems::components::PlayerControlled>>();
    let position = player_query.single(&world).expect("Player should exist");
    assert_that(&position.0.x).is_equal_to(mechanics::PLAYER_START_X);
}

#[test]
fn test_game_over_triggers_once_lives_run_out() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Running);
    world.insert_resource(PlayerLives(0));

    world
        .run_system_once(game_over)
        .expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::GameOver);

    let events = common::drain_audio_events(&mut world);
    assert_that(&events).contains(AudioEvent::StopMusic);
    assert_that(&events).contains(AudioEvent::Play(Cue::GameOver));
}

#[test]
fn test_game_over_leaves_live_runs_alone() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Running);

    world
        .run_system_once(game_over)
        .expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Running);
}

#[test]
fn test_level_progress_waits_for_fruit() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);
    world.insert_resource(GameStage::Running);

    use forest_runner::systems::bundles::FruitBundle;
    use forest_runner::systems::components::FruitColor;
    world.spawn(FruitBundle::new(600.0, 440.0, FruitColor::Red));

    world
        .run_system_once(level_progress)
        .expect("System should run successfully");

    assert_that(&world.resource::<CurrentLevel>().0).is_equal_to(1);
}

#[test]
fn test_level_progress_advances_and_rebuilds() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world);
    world.insert_resource(GameStage::Running);
    world.insert_resource(ScoreResource(130));

    world
        .run_system_once(level_progress)
        .expect("System should run successfully");

    assert_that(&world.resource::<CurrentLevel>().0).is_equal_to(2);
    // 130 plus the 50 + 10 * new level completion bonus.
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(200);

    let events = common::drain_audio_events(&mut world);
    assert_that(&events).contains(AudioEvent::Play(Cue::LevelUp));

    // Level 2 layout: 16 fruits, 7 animals, 2 obstacles, no power-ups.
    let mut query = world.query::<&EntityKind>();
    let mut fruits = 0;
    let mut animals = 0;
    let mut obstacles = 0;
    let mut power_ups = 0;
    for kind in query.iter(&world) {
        match kind {
            EntityKind::Fruit(_) => fruits += 1,
            EntityKind::Animal(_) => animals += 1,
            EntityKind::Obstacle => obstacles += 1,
            EntityKind::PowerUp(_) => power_ups += 1,
            _ => {}
        }
    }
    assert_that(&fruits).is_equal_to(16);
    assert_that(&animals).is_equal_to(7);
    assert_that(&obstacles).is_equal_to(2);
    assert_that(&power_ups).is_equal_to(0);
}

#[test]
fn test_consumed_events_do_not_accumulate() {
    let mut world = common::create_test_world();

    common::send_game_event(&mut world, GameEvent::Command(GameCommand::Start));
    world
        .resource_mut::<Events<AudioEvent>>()
        .send(AudioEvent::StartMusic);

    // Events survive one buffer swap for late readers and drop on the next.
    for _ in 0..2 {
        world
            .run_system_once(flush_events)
            .expect("System should run successfully");
    }

    assert_that(&world.resource::<Events<GameEvent>>().is_empty()).is_true();
    assert_that(&world.resource::<Events<AudioEvent>>().is_empty()).is_true();
}

#[test]
fn test_boosts_survive_level_transition() {
    use forest_runner::systems::components::BoostTimers;

    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);
    world.insert_resource(GameStage::Running);
    world
        .entity_mut(player)
        .get_mut::<BoostTimers>()
        .expect("Player has boost timers")
        .grant_speed();

    world
        .run_system_once(level_progress)
        .expect("System should run successfully");

    let mut query = world.query::<&BoostTimers>();
    let boosts = query.single(&world).expect("Player should exist");
    assert_that(&boosts.speed).is_equal_to(mechanics::SPEED_BOOST_TICKS);
}
