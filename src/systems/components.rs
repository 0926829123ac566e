use bevy_ecs::{component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::mechanics;

/// Color of a fruit, purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitColor {
    Red,
    Orange,
    Pink,
    Yellow,
}

impl FruitColor {
    pub fn pick(rng: &mut SmallRng) -> Self {
        match rng.random_range(0..4) {
            0 => FruitColor::Red,
            1 => FruitColor::Orange,
            2 => FruitColor::Pink,
            _ => FruitColor::Yellow,
        }
    }
}

/// The four power-up effects. Chosen uniformly at random at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoostKind {
    Speed,
    Jump,
    ExtraLife,
    Invulnerability,
}

impl BoostKind {
    pub fn pick(rng: &mut SmallRng) -> Self {
        match rng.random_range(0..4) {
            0 => BoostKind::Speed,
            1 => BoostKind::Jump,
            2 => BoostKind::ExtraLife,
            _ => BoostKind::Invulnerability,
        }
    }
}

/// Species of a wild animal, cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalKind {
    Fox,
    Bear,
    Wolf,
    Pig,
}

impl AnimalKind {
    pub fn pick(rng: &mut SmallRng) -> Self {
        match rng.random_range(0..4) {
            0 => AnimalKind::Fox,
            1 => AnimalKind::Bear,
            2 => AnimalKind::Wolf,
            _ => AnimalKind::Pig,
        }
    }
}

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Fruit(FruitColor),
    PowerUp(BoostKind),
    Obstacle,
    Animal(AnimalKind),
    Tree,
}

impl EntityKind {
    pub fn is_collectible(&self) -> bool {
        matches!(self, EntityKind::Fruit(_) | EntityKind::PowerUp(_))
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Obstacle | EntityKind::Animal(_))
    }
}

/// World position of an entity's top-left corner, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Axis-aligned collision box, anchored at the entity's `Position`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub size: Vec2,
}

/// Vertical velocity, in pixels per tick. Horizontal motion is a direct
/// per-tick step and carries no persistent velocity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub y: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Walk-cycle animation state shared by the player and animals.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct WalkCycle {
    pub frame: u8,
    pub timer: u8,
}

impl WalkCycle {
    /// Advances the cycle, changing frame every `frame_ticks` ticks.
    pub fn advance(&mut self, frame_ticks: u8, frame_count: u8) {
        self.timer += 1;
        if self.timer > frame_ticks {
            self.frame = (self.frame + 1) % frame_count;
            self.timer = 0;
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0;
    }
}

/// Floating animation applied to power-ups: the offset drifts between
/// -BOB_LIMIT and +BOB_LIMIT, reversing at the bounds.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bobbing {
    pub offset: i32,
    pub direction: i32,
}

impl Default for Bobbing {
    fn default() -> Self {
        Self { offset: 0, direction: 1 }
    }
}

/// Patrol state for a wild animal.
#[derive(Component, Debug, Clone, Copy)]
pub struct Patrol {
    /// +1.0 or -1.0.
    pub direction: f32,
    /// Pixels per tick, base speed plus the level's game speed.
    pub speed: f32,
    /// Spawn anchor the animal oscillates around.
    pub start_x: f32,
    /// Ticks since the last direction reversal.
    pub move_timer: u32,
}

impl Patrol {
    pub fn new(start_x: f32, speed: f32) -> Self {
        Self {
            direction: 1.0,
            speed,
            start_x,
            move_timer: 0,
        }
    }

    pub fn reverse(&mut self) {
        self.direction = -self.direction;
        self.move_timer = 0;
    }
}

/// Countdown timers for the player's active boosts, in ticks. A zero timer
/// means the boost is inactive.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BoostTimers {
    pub speed: u32,
    pub jump: u32,
    pub invulnerability: u32,
}

impl BoostTimers {
    pub fn tick(&mut self) {
        self.speed = self.speed.saturating_sub(1);
        self.jump = self.jump.saturating_sub(1);
        self.invulnerability = self.invulnerability.saturating_sub(1);
    }

    pub fn is_shielded(&self) -> bool {
        self.invulnerability > 0
    }

    pub fn grant_speed(&mut self) {
        self.speed = mechanics::SPEED_BOOST_TICKS;
    }

    pub fn grant_jump(&mut self) {
        self.jump = mechanics::JUMP_BOOST_TICKS;
    }

    pub fn grant_shield(&mut self) {
        self.invulnerability = mechanics::SHIELD_PICKUP_TICKS;
    }

    /// Registers a hit, starting the short post-damage shield. The caller
    /// decides whether the hit lands; this only records it.
    pub fn apply_hit(&mut self) {
        self.invulnerability = mechanics::DAMAGE_SHIELD_TICKS;
    }

    /// Registers a hit unless a shield is already active. Returns whether
    /// the hit landed.
    pub fn take_damage(&mut self) -> bool {
        if self.is_shielded() {
            return false;
        }
        self.apply_hit();
        true
    }

    pub fn current_speed(&self) -> f32 {
        if self.speed > 0 {
            mechanics::BOOSTED_SPEED
        } else {
            mechanics::BASE_SPEED
        }
    }

    pub fn current_jump_power(&self) -> f32 {
        if self.jump > 0 {
            mechanics::BOOSTED_JUMP_POWER
        } else {
            mechanics::BASE_JUMP_POWER
        }
    }
}

/// Marker for the player entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// Marker for the player's collision box.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerCollider;

/// Marker for collectible colliders (fruits, power-ups).
#[derive(Component, Debug, Clone, Copy)]
pub struct PickupCollider;

/// Marker for damaging colliders (obstacles, animals).
#[derive(Component, Debug, Clone, Copy)]
pub struct HazardCollider;

/// Marker for every entity spawned by the level generator. Cleared wholesale
/// on level transitions and restarts.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelEntity;

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ScoreResource(pub u32);

/// The current level number, starting at 1.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLevel(pub u32);

impl Default for CurrentLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl CurrentLevel {
    /// Game speed added to every animal's patrol speed, derived from the
    /// level number by integer division.
    pub fn game_speed(&self) -> u32 {
        1 + (self.0 - 1) / 3
    }
}

/// A resource to store the number of player lives. Clamped to 0..=MAX_LIVES.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(mechanics::STARTING_LIVES)
    }
}

impl PlayerLives {
    /// Adds one life, capped at the maximum.
    pub fn grant_extra(&mut self) {
        if self.0 < mechanics::MAX_LIVES {
            self.0 += 1;
        }
    }

    pub fn lose_one(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }
}

/// Horizontally smoothed view offset. Eases toward the player each tick and
/// never quite reaches its target; the residual drift is acceptable.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Camera {
    pub x: f32,
}

/// The session RNG. Owned by the world so tests can seed it.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

/// Snapshot of held movement keys, sampled once at the start of each tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}
