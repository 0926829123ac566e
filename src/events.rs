use bevy_ecs::event::{Event, Events};
use bevy_ecs::system::ResMut;

use crate::audio::Cue;

/// Discrete actions produced by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Start a new run, or restart after a game over.
    Start,
    Exit,
    MuteAudio,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Fire-and-forget requests consumed by the audio system at the end of the
/// tick. The simulation never waits on these.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    StartMusic,
    StopMusic,
    Play(Cue),
}

/// Swaps the event double-buffers once every reader has run, so events from
/// finished ticks are dropped instead of accumulating for the life of the
/// process.
pub fn flush_events(mut game: ResMut<Events<GameEvent>>, mut audio: ResMut<Events<AudioEvent>>) {
    game.update();
    audio.update();
}
