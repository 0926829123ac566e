//! Component bundles for every entity class the level generator spawns.

use bevy_ecs::bundle::Bundle;
use glam::Vec2;

use crate::constants::{body, mechanics, GROUND_Y};
use crate::systems::components::{
    AnimalKind, Bobbing, BoostKind, BoostTimers, Collider, EntityKind, Facing, FruitColor,
    Grounded, HazardCollider, LevelEntity, Patrol, PickupCollider, PlayerCollider,
    PlayerControlled, Position, Velocity, WalkCycle,
};

#[derive(Bundle)]
pub struct PlayerBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub collider: Collider,
    pub velocity: Velocity,
    pub grounded: Grounded,
    pub facing: Facing,
    pub walk: WalkCycle,
    pub boosts: BoostTimers,
    pub controlled: PlayerControlled,
    pub player_collider: PlayerCollider,
}

impl PlayerBundle {
    /// The player always enters a level at the same spot, standing on the
    /// ground with no residual boosts.
    pub fn at_start() -> Self {
        Self {
            kind: EntityKind::Player,
            position: Position(Vec2::new(
                mechanics::PLAYER_START_X,
                GROUND_Y - body::PLAYER.y,
            )),
            collider: Collider { size: body::PLAYER },
            velocity: Velocity::default(),
            grounded: Grounded(true),
            facing: Facing::Right,
            walk: WalkCycle::default(),
            boosts: BoostTimers::default(),
            controlled: PlayerControlled,
            player_collider: PlayerCollider,
        }
    }
}

#[derive(Bundle)]
pub struct FruitBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub collider: Collider,
    pub pickup: PickupCollider,
    pub level_entity: LevelEntity,
}

impl FruitBundle {
    pub fn new(x: f32, y: f32, color: FruitColor) -> Self {
        Self {
            kind: EntityKind::Fruit(color),
            position: Position(Vec2::new(x, y)),
            collider: Collider { size: body::FRUIT },
            pickup: PickupCollider,
            level_entity: LevelEntity,
        }
    }
}

#[derive(Bundle)]
pub struct PowerUpBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub collider: Collider,
    pub bobbing: Bobbing,
    pub pickup: PickupCollider,
    pub level_entity: LevelEntity,
}

impl PowerUpBundle {
    pub fn new(x: f32, y: f32, boost: BoostKind) -> Self {
        Self {
            kind: EntityKind::PowerUp(boost),
            position: Position(Vec2::new(x, y)),
            collider: Collider { size: body::POWER_UP },
            bobbing: Bobbing::default(),
            pickup: PickupCollider,
            level_entity: LevelEntity,
        }
    }
}

#[derive(Bundle)]
pub struct ObstacleBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub collider: Collider,
    pub hazard: HazardCollider,
    pub level_entity: LevelEntity,
}

impl ObstacleBundle {
    pub fn new(x: f32) -> Self {
        Self {
            kind: EntityKind::Obstacle,
            position: Position(Vec2::new(x, GROUND_Y - body::OBSTACLE.y)),
            collider: Collider { size: body::OBSTACLE },
            hazard: HazardCollider,
            level_entity: LevelEntity,
        }
    }
}

#[derive(Bundle)]
pub struct AnimalBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub collider: Collider,
    pub patrol: Patrol,
    pub walk: WalkCycle,
    pub facing: Facing,
    pub hazard: HazardCollider,
    pub level_entity: LevelEntity,
}

impl AnimalBundle {
    pub fn new(x: f32, species: AnimalKind, game_speed: u32) -> Self {
        Self {
            kind: EntityKind::Animal(species),
            // Animals stand a couple of pixels into the grass line.
            position: Position(Vec2::new(x, GROUND_Y - 40.0)),
            collider: Collider { size: body::ANIMAL },
            patrol: Patrol::new(x, crate::constants::patrol::BASE_SPEED + game_speed as f32),
            walk: WalkCycle::default(),
            facing: Facing::Right,
            hazard: HazardCollider,
            level_entity: LevelEntity,
        }
    }
}

/// Decorative background trees. No collider; nothing interacts with them.
#[derive(Bundle)]
pub struct TreeBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub level_entity: LevelEntity,
}

impl TreeBundle {
    pub fn new(x: f32) -> Self {
        Self {
            kind: EntityKind::Tree,
            position: Position(Vec2::new(x, GROUND_Y - body::TREE.y)),
            level_entity: LevelEntity,
        }
    }
}
