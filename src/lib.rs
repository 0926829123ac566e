//! Forest Runner game library crate.

pub mod app;
pub mod audio;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod systems;
