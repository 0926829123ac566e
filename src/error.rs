//! Centralized error types for the game.
//!
//! The simulation itself has no fallible operations; everything here covers
//! the SDL2 boundary (window, canvas, audio device).

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while bringing up the audio device or loading clips.
///
/// These never reach the simulation; the audio subsystem collapses them
/// into a disabled state and plays nothing.
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("Failed to open audio device: {0}")]
    DeviceOpen(String),

    #[error("Failed to initialize mixer: {0}")]
    MixerInit(String),

    #[error("Failed to load clip {name}: {reason}")]
    ClipLoad { name: String, reason: String },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
