#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use forest_runner::events::{AudioEvent, GameEvent};
use forest_runner::systems::audio::AudioState;
use forest_runner::systems::bundles::PlayerBundle;
use forest_runner::systems::components::{
    Camera, CurrentLevel, GameRng, GlobalState, InputSnapshot, PlayerLives, ScoreResource,
};
use forest_runner::systems::stage::GameStage;

/// Builds a world with every resource the gameplay systems expect, seeded
/// with a fixed RNG so tests are deterministic.
pub fn create_test_world() -> World {
    let mut world = World::default();

    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<AudioEvent>(&mut world);

    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(ScoreResource(0));
    world.insert_resource(CurrentLevel::default());
    world.insert_resource(PlayerLives::default());
    world.insert_resource(Camera::default());
    world.insert_resource(GameRng(SmallRng::seed_from_u64(1234)));
    world.insert_resource(InputSnapshot::default());
    world.insert_resource(GameStage::default());
    world.insert_resource(AudioState::default());

    world
}

pub fn spawn_test_player(world: &mut World) -> Entity {
    world.spawn(PlayerBundle::at_start()).id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.resource_mut::<Events<GameEvent>>().send(event);
}

/// Drains and returns every audio event emitted so far.
pub fn drain_audio_events(world: &mut World) -> Vec<AudioEvent> {
    world.resource_mut::<Events<AudioEvent>>().drain().collect()
}
