//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the window, in pixels.
pub const SCREEN_SIZE: UVec2 = UVec2::new(800, 600);

/// The Y coordinate of the ground line. Everything below it is dirt.
pub const GROUND_Y: f32 = 500.0;

/// Gameplay mechanics constants, all expressed in pixels and ticks.
pub mod mechanics {
    /// Horizontal pixels per tick without a speed boost.
    pub const BASE_SPEED: f32 = 5.0;
    /// Horizontal pixels per tick with a speed boost.
    pub const BOOSTED_SPEED: f32 = 10.0;
    /// Initial vertical velocity of a normal jump.
    pub const BASE_JUMP_POWER: f32 = -15.0;
    /// Initial vertical velocity of a boosted jump.
    pub const BOOSTED_JUMP_POWER: f32 = -20.0;
    /// Downward acceleration applied every tick.
    pub const GRAVITY: f32 = 1.0;

    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Where the player respawns on level start, in world pixels.
    pub const PLAYER_START_X: f32 = 50.0;

    pub const SPEED_BOOST_TICKS: u32 = 600;
    pub const JUMP_BOOST_TICKS: u32 = 600;
    /// Invulnerability granted by the power-up.
    pub const SHIELD_PICKUP_TICKS: u32 = 300;
    /// Invulnerability granted after taking a hit.
    pub const DAMAGE_SHIELD_TICKS: u32 = 120;

    /// Fraction of the camera-to-target gap closed each tick.
    pub const CAMERA_EASING: f32 = 0.1;
}

/// Collision box sizes for each entity class.
pub mod body {
    use super::Vec2;

    pub const PLAYER: Vec2 = Vec2::new(40.0, 64.0);
    pub const FRUIT: Vec2 = Vec2::new(20.0, 20.0);
    pub const POWER_UP: Vec2 = Vec2::new(25.0, 25.0);
    pub const OBSTACLE: Vec2 = Vec2::new(30.0, 40.0);
    pub const ANIMAL: Vec2 = Vec2::new(38.0, 42.0);
    pub const TREE: Vec2 = Vec2::new(40.0, 80.0);
}

/// Patrol behavior constants for wild animals.
pub mod patrol {
    /// Maximum distance an animal wanders from its spawn anchor.
    pub const DISTANCE: f32 = 100.0;
    /// Speed before the per-level game speed is added.
    pub const BASE_SPEED: f32 = 2.0;
    /// Ticks without a reversal before random reversals become possible.
    pub const RESTLESS_TICKS: u32 = 120;
    /// Percent chance per tick of a random reversal once restless.
    pub const RANDOM_FLIP_PERCENT: u32 = 5;
}

/// Cosmetic animation timing.
pub mod animation {
    /// Ticks between player walk-cycle frames.
    pub const PLAYER_WALK_TICKS: u8 = 8;
    /// Ticks between animal walk-cycle frames.
    pub const ANIMAL_WALK_TICKS: u8 = 15;
    /// Both walk cycles are four frames long.
    pub const WALK_FRAMES: u8 = 4;
    /// Power-ups float up and down within this many pixels.
    pub const BOB_LIMIT: i32 = 10;
    /// Invulnerability blink period divisor (timer / 10 % 2).
    pub const BLINK_DIVISOR: u32 = 10;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_screen_geometry() {
        assert_eq!(SCREEN_SIZE.x, 800);
        assert_eq!(SCREEN_SIZE.y, 600);
        assert!(GROUND_Y < SCREEN_SIZE.y as f32);
    }

    #[test]
    fn test_boost_exceeds_base() {
        assert!(mechanics::BOOSTED_SPEED > mechanics::BASE_SPEED);
        assert!(mechanics::BOOSTED_JUMP_POWER < mechanics::BASE_JUMP_POWER);
    }

    #[test]
    fn test_lives_bounds() {
        assert!(mechanics::STARTING_LIVES <= mechanics::MAX_LIVES);
    }

    #[test]
    fn test_bodies_fit_above_ground() {
        for size in [body::PLAYER, body::FRUIT, body::POWER_UP, body::OBSTACLE, body::ANIMAL] {
            assert!(size.y < GROUND_Y);
            assert!(size.x > 0.0 && size.y > 0.0);
        }
    }

    #[test]
    fn test_damage_shield_shorter_than_pickup_shield() {
        assert!(mechanics::DAMAGE_SHIELD_TICKS < mechanics::SHIELD_PICKUP_TICKS);
    }
}
