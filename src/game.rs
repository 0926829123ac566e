//! This module contains the main game logic and state.

use bevy_ecs::event::EventRegistry;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sdl2::event::EventType;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use tracing::{debug, info};

use crate::audio::Audio;
use crate::error::GameResult;
use crate::events::{flush_events, AudioEvent, GameEvent};
use crate::level;
use crate::systems::audio::{audio_system, AudioResource, AudioState};
use crate::systems::bundles::PlayerBundle;
use crate::systems::camera::camera_follow;
use crate::systems::collision::collision_system;
use crate::systems::components::{
    Camera, CurrentLevel, GameRng, GlobalState, InputSnapshot, PlayerLives, ScoreResource,
};
use crate::systems::input::{input_system, Bindings};
use crate::systems::render::render_system;
use crate::systems::stage::{game_over, level_progress, stage_system, GameStage};
use crate::systems::{animal::animal_patrol, player::player_update, powerup::powerup_bob};

/// System set for all gameplay systems to ensure they run after input
/// processing.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs.
    Input,
    /// Gameplay systems that update the game state.
    Update,
    /// Gameplay systems that respond to the updated state.
    Respond,
}

/// System set for rendering and output, after all gameplay logic.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum OutputSet {
    Draw,
    Audio,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Orchestrates all game systems through a centralized `World` containing
/// entities, components, and resources, while a `Schedule` defines system
/// execution order. SDL2 resources are stored as `NonSend` to respect thread
/// safety requirements while integrating with the ECS.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Initializes the complete game state: ECS world, resources, the player
    /// entity, and the first level's layout.
    ///
    /// The world underneath the title screen is fully built, so the first
    /// start command only has to flip the stage.
    pub fn new(canvas: Canvas<Window>, mut event_pump: EventPump) -> GameResult<Game> {
        info!("Starting game initialization");

        debug!("Disabling unnecessary SDL events");
        Self::disable_sdl_events(&mut event_pump);

        debug!("Initializing audio subsystem");
        let audio = Audio::new();

        debug!("Initializing ECS world and system schedule");
        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, audio, event_pump, canvas);
        Self::configure_schedule(&mut schedule);

        debug!("Spawning player entity");
        world.spawn(PlayerBundle::at_start());

        info!("Generating first level");
        Self::build_level(&mut world);

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn disable_sdl_events(event_pump: &mut EventPump) {
        for event_type in [
            EventType::JoyAxisMotion,
            EventType::JoyBallMotion,
            EventType::JoyHatMotion,
            EventType::JoyButtonDown,
            EventType::JoyButtonUp,
            EventType::JoyDeviceAdded,
            EventType::JoyDeviceRemoved,
            EventType::ControllerAxisMotion,
            EventType::ControllerButtonDown,
            EventType::ControllerButtonUp,
            EventType::ControllerDeviceAdded,
            EventType::ControllerDeviceRemoved,
            EventType::MouseMotion,
            EventType::MouseWheel,
            EventType::ClipboardUpdate,
            EventType::DropFile,
            EventType::DropText,
            EventType::DropBegin,
            EventType::DropComplete,
            EventType::TextInput,
            EventType::TextEditing,
            EventType::User,
            EventType::Last,
        ] {
            event_pump.disable_event(event_type);
        }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    fn insert_resources(world: &mut World, audio: Audio, event_pump: EventPump, canvas: Canvas<Window>) {
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(ScoreResource(0));
        world.insert_resource(CurrentLevel::default());
        world.insert_resource(PlayerLives::default());
        world.insert_resource(Camera::default());
        world.insert_resource(GameRng(SmallRng::from_os_rng()));
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(AudioState::default());

        world.insert_non_send_resource::<&'static mut EventPump>(Box::leak(Box::new(event_pump)));
        world.insert_non_send_resource::<&'static mut Canvas<Window>>(Box::leak(Box::new(canvas)));
        world.insert_non_send_resource(AudioResource(audio));
    }

    /// Plans and spawns the current level directly on the world, outside the
    /// schedule. Used once during initialization.
    fn build_level(world: &mut World) {
        let (plan, game_speed) = {
            let level_number = world.resource::<CurrentLevel>().0;
            let game_speed = world.resource::<CurrentLevel>().game_speed();
            let mut rng = world.resource_mut::<GameRng>();
            (level::plan_level(level_number, &mut rng.0), game_speed)
        };

        let mut commands = world.commands();
        level::spawn_level(&mut commands, &plan, game_speed);
        world.flush();
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let running = |stage: Res<GameStage>| *stage == GameStage::Running;

        schedule
            .add_systems((
                (input_system, stage_system).chain().in_set(GameplaySet::Input),
                (
                    player_update,
                    camera_follow,
                    animal_patrol,
                    powerup_bob,
                    collision_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (level_progress, game_over).chain().in_set(GameplaySet::Respond),
                render_system.in_set(OutputSet::Draw),
                (audio_system, flush_events).chain().in_set(OutputSet::Audio),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(running),
                    GameplaySet::Respond.run_if(running),
                    OutputSet::Draw,
                    OutputSet::Audio,
                )
                    .chain(),
            );
    }

    /// Executes one fixed tick of game logic by running all scheduled ECS
    /// systems.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false`
    /// to continue.
    pub fn tick(&mut self) -> bool {
        self.schedule.run(&mut self.world);

        self.world.resource::<GlobalState>().exit
    }
}
