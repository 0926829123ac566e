//! ECS side of audio playback.
//!
//! SDL2_mixer handles are not `Send`, so the `Audio` wrapper lives in a
//! non-send resource and this system is the only code that touches it. The
//! simulation communicates through `AudioEvent`s.

use bevy_ecs::{
    event::EventReader,
    resource::Resource,
    system::{NonSendMut, ResMut},
};
use tracing::{debug, trace};

use crate::audio::Audio;
use crate::events::{AudioEvent, GameCommand, GameEvent};

/// Resource for tracking the user's audio preference.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AudioState {
    pub muted: bool,
}

/// Non-send resource wrapper for the SDL2 audio system.
pub struct AudioResource(pub Audio);

/// Processes mute toggles and playback requests at the end of the tick.
pub fn audio_system(
    mut audio: NonSendMut<AudioResource>,
    mut state: ResMut<AudioState>,
    mut commands: EventReader<GameEvent>,
    mut events: EventReader<AudioEvent>,
) {
    for event in commands.read() {
        if let GameEvent::Command(GameCommand::MuteAudio) = event {
            state.muted = !state.muted;
            debug!(muted = state.muted, "Audio mute toggled");
        }
    }

    if audio.0.is_muted() != state.muted {
        audio.0.set_mute(state.muted);
    }

    for event in events.read() {
        match event {
            AudioEvent::Play(cue) => {
                if !audio.0.is_disabled() && !state.muted {
                    trace!(?cue, "Playing cue");
                    audio.0.play(*cue);
                }
            }
            AudioEvent::StartMusic => {
                debug!("Starting music");
                audio.0.start_music();
            }
            AudioEvent::StopMusic => {
                debug!("Stopping music");
                audio.0.stop_music();
            }
        }
    }
}
