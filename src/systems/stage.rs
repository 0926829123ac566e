use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use tracing::info;

use crate::audio::Cue;
use crate::constants::{body, mechanics, GROUND_Y};
use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::level;
use crate::systems::components::{
    BoostTimers, Camera, CurrentLevel, EntityKind, GameRng, GlobalState, Grounded, LevelEntity,
    PickupCollider, PlayerControlled, PlayerLives, Position, ScoreResource, Velocity, WalkCycle,
};

/// A resource tracking the overall stage of the game from a high-level
/// perspective.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum GameStage {
    /// Title screen. The world for level 1 is already built underneath it.
    #[default]
    NotStarted,
    /// The main gameplay loop is active.
    Running,
    /// All lives are spent. A start command begins a fresh run.
    GameOver,
}

/// Handles start/restart and exit commands.
///
/// A restart from the game-over screen rebuilds the run from scratch:
/// score, level, lives, camera, the level layout, and the player's state
/// all reset.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut stage: ResMut<GameStage>,
    mut global: ResMut<GlobalState>,
    mut score: ResMut<ScoreResource>,
    mut current_level: ResMut<CurrentLevel>,
    mut lives: ResMut<PlayerLives>,
    mut camera: ResMut<Camera>,
    mut rng: ResMut<GameRng>,
    mut audio_events: EventWriter<AudioEvent>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut player: Query<
        (
            &mut Position,
            &mut Velocity,
            &mut Grounded,
            &mut BoostTimers,
            &mut WalkCycle,
        ),
        With<PlayerControlled>,
    >,
) {
    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::Exit) => {
                info!("Exit requested");
                global.exit = true;
            }
            GameEvent::Command(GameCommand::Start) => match *stage {
                GameStage::NotStarted => {
                    info!("Game started");
                    *stage = GameStage::Running;
                    audio_events.write(AudioEvent::StartMusic);
                }
                GameStage::GameOver => {
                    info!("Restarting after game over");
                    score.0 = 0;
                    *current_level = CurrentLevel::default();
                    *lives = PlayerLives::default();
                    camera.x = 0.0;

                    for entity in level_entities.iter() {
                        commands.entity(entity).despawn();
                    }
                    let plan = level::plan_level(current_level.0, &mut rng.0);
                    level::spawn_level(&mut commands, &plan, current_level.game_speed());

                    if let Ok((mut position, mut velocity, mut grounded, mut boosts, mut walk)) =
                        player.single_mut()
                    {
                        position.0.x = mechanics::PLAYER_START_X;
                        position.0.y = GROUND_Y - body::PLAYER.y;
                        velocity.y = 0.0;
                        grounded.0 = true;
                        *boosts = BoostTimers::default();
                        walk.reset();
                    }

                    *stage = GameStage::Running;
                    audio_events.write(AudioEvent::StartMusic);
                }
                GameStage::Running => {}
            },
            GameEvent::Command(GameCommand::MuteAudio) => {}
        }
    }
}

/// Advances to the next level once every fruit has been collected. Active
/// boosts deliberately carry over; only the player's position resets.
pub fn level_progress(
    mut commands: Commands,
    mut score: ResMut<ScoreResource>,
    mut current_level: ResMut<CurrentLevel>,
    mut camera: ResMut<Camera>,
    mut rng: ResMut<GameRng>,
    mut audio_events: EventWriter<AudioEvent>,
    fruits: Query<&EntityKind, With<PickupCollider>>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut player: Query<(&mut Position, &mut Velocity, &mut Grounded), With<PlayerControlled>>,
) {
    let fruits_remaining = fruits
        .iter()
        .filter(|kind| matches!(kind, EntityKind::Fruit(_)))
        .count();
    if fruits_remaining > 0 {
        return;
    }

    current_level.0 += 1;
    score.0 += 50 + current_level.0 * 10;
    info!(level = current_level.0, score = score.0, "Level complete");

    for entity in level_entities.iter() {
        commands.entity(entity).despawn();
    }
    let plan = level::plan_level(current_level.0, &mut rng.0);
    level::spawn_level(&mut commands, &plan, current_level.game_speed());

    if let Ok((mut position, mut velocity, mut grounded)) = player.single_mut() {
        position.0.x = mechanics::PLAYER_START_X;
        position.0.y = GROUND_Y - body::PLAYER.y;
        velocity.y = 0.0;
        grounded.0 = true;
    }
    camera.x = 0.0;

    audio_events.write(AudioEvent::Play(Cue::LevelUp));
}

/// Ends the run once the last life is spent.
pub fn game_over(
    mut stage: ResMut<GameStage>,
    lives: Res<PlayerLives>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if *stage == GameStage::Running && lives.0 == 0 {
        info!("All lives lost, game over");
        *stage = GameStage::GameOver;
        audio_events.write(AudioEvent::StopMusic);
        audio_events.write(AudioEvent::Play(Cue::GameOver));
    }
}
