//! This module handles the audio playback for the game.
use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use sdl2::mixer::{self, Chunk, InitFlag, Music, AUDIO_S16LSB};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const AUDIO_FREQUENCY: i32 = 22_050;
const AUDIO_CHANNELS: i32 = 4;
const CHUNK_SIZE: i32 = 256;
const DEFAULT_VOLUME: u8 = 32;

/// Directory searched for sound clips. Every clip is optional; a missing
/// file simply silences that cue.
const SOUND_DIR: &str = "assets/sounds";

/// Named sound effects the simulation can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Cue {
    Collect,
    Jump,
    Hit,
    GameOver,
    LevelUp,
}

impl Cue {
    fn file_name(self) -> &'static str {
        match self {
            Cue::Collect => "collect.ogg",
            Cue::Jump => "jump.ogg",
            Cue::Hit => "hit.ogg",
            Cue::GameOver => "game_over.ogg",
            Cue::LevelUp => "level_up.ogg",
        }
    }
}

/// The audio system for the game.
///
/// This struct is responsible for initializing the audio device, loading
/// clips, and playing them. If audio fails to initialize, it will be disabled
/// and all functions will silently do nothing.
pub struct Audio {
    _mixer_context: Option<mixer::Sdl2MixerContext>,
    clips: HashMap<Cue, Chunk>,
    music: Option<Music<'static>>,
    state: AudioState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Enabled { volume: u8 },
    Muted { previous_volume: u8 },
    Disabled,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    /// Creates a new `Audio` instance.
    ///
    /// If the device fails to initialize, the audio system will be disabled
    /// and all functions will silently do nothing. Missing clip files only
    /// silence their own cue.
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}. Audio will be disabled.", e);
                Self {
                    _mixer_context: None,
                    clips: HashMap::new(),
                    music: None,
                    state: AudioState::Disabled,
                }
            }
        }
    }

    fn try_new() -> Result<Self> {
        mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, AUDIO_CHANNELS, CHUNK_SIZE)
            .map_err(|e| anyhow!("Failed to open audio: {}", e))?;

        mixer::allocate_channels(AUDIO_CHANNELS);
        for i in 0..AUDIO_CHANNELS {
            mixer::Channel(i).set_volume(DEFAULT_VOLUME as i32);
        }

        let mixer_context = mixer::init(InitFlag::OGG).map_err(|e| anyhow!("Failed to initialize SDL2_mixer: {}", e))?;

        // Clips are loaded best-effort; the game ships with no bundled assets
        // and stays fully playable in silence.
        let clips: HashMap<Cue, Chunk> = Cue::iter()
            .filter_map(|cue| {
                let path = Path::new(SOUND_DIR).join(cue.file_name());
                match Chunk::from_file(&path) {
                    Ok(chunk) => Some((cue, chunk)),
                    Err(e) => {
                        tracing::debug!(cue = ?cue, path = %path.display(), "Sound clip unavailable: {}", e);
                        None
                    }
                }
            })
            .collect();

        let music_path = Path::new(SOUND_DIR).join("forest.ogg");
        let music = match Music::from_file(&music_path) {
            Ok(music) => Some(music),
            Err(e) => {
                tracing::debug!(path = %music_path.display(), "Background music unavailable: {}", e);
                None
            }
        };

        tracing::info!(clips = clips.len(), music = music.is_some(), "Audio initialized");

        Ok(Audio {
            _mixer_context: Some(mixer_context),
            clips,
            music,
            state: AudioState::Enabled { volume: DEFAULT_VOLUME },
        })
    }

    /// Plays the provided cue once. Silently returns if audio is disabled,
    /// muted, or the clip failed to load.
    pub fn play(&mut self, cue: Cue) {
        if !matches!(self.state, AudioState::Enabled { .. }) {
            return;
        }

        if let Some(chunk) = self.clips.get(&cue) {
            match mixer::Channel::all().play(chunk, 0) {
                Ok(channel) => tracing::trace!(cue = ?cue, channel = ?channel, "Playing cue"),
                Err(e) => tracing::warn!(cue = ?cue, "Could not play cue: {}", e),
            }
        }
    }

    /// Starts the ambient music loop from the beginning.
    pub fn start_music(&mut self) {
        if self.state == AudioState::Disabled {
            return;
        }

        if let Some(music) = &self.music {
            if let Err(e) = music.play(-1) {
                tracing::warn!("Could not start music: {}", e);
            }
        }
    }

    /// Halts the ambient music loop.
    pub fn stop_music(&mut self) {
        if self.state != AudioState::Disabled {
            Music::halt();
        }
    }

    /// Instantly mutes or unmutes all audio channels by adjusting their volume.
    ///
    /// The mute state is tracked internally regardless of whether audio is
    /// disabled, allowing the preference to be preserved.
    pub fn set_mute(&mut self, mute: bool) {
        match (mute, self.state) {
            (true, AudioState::Enabled { volume }) => {
                self.state = AudioState::Muted { previous_volume: volume };
                for i in 0..AUDIO_CHANNELS {
                    mixer::Channel(i).set_volume(0);
                }
                Music::set_volume(0);
            }
            (false, AudioState::Muted { previous_volume }) => {
                self.state = AudioState::Enabled { volume: previous_volume };
                for i in 0..AUDIO_CHANNELS {
                    mixer::Channel(i).set_volume(previous_volume as i32);
                }
                Music::set_volume(previous_volume as i32);
            }
            _ => {}
        }
    }

    /// Returns the current mute state regardless of whether audio is functional.
    pub fn is_muted(&self) -> bool {
        matches!(self.state, AudioState::Muted { .. })
    }

    /// Returns whether the audio system failed to initialize and is non-functional.
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, AudioState::Disabled)
    }
}
