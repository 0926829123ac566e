//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components,
//! systems, and resources.

pub mod animal;
pub mod audio;
pub mod bundles;
pub mod camera;
pub mod collision;
pub mod components;
pub mod input;
pub mod player;
pub mod powerup;
pub mod render;
pub mod stage;
