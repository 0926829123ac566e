//! Level generation.
//!
//! Generation is split into a pure planning step and a spawning step so the
//! layout logic can be tested against a seeded RNG without a world.

use bevy_ecs::system::Commands;
use rand::rngs::SmallRng;
use rand::Rng;
use smallvec::SmallVec;

use crate::constants::GROUND_Y;
use crate::systems::bundles::{
    AnimalBundle, FruitBundle, ObstacleBundle, PowerUpBundle, TreeBundle,
};
use crate::systems::components::{AnimalKind, BoostKind, FruitColor};

/// Spacing of the decorative background trees, in pixels.
const TREE_SPACING: f32 = 220.0;

#[derive(Debug, Clone)]
pub struct FruitSpawn {
    pub x: f32,
    pub y: f32,
    pub color: FruitColor,
}

#[derive(Debug, Clone)]
pub struct AnimalSpawn {
    pub x: f32,
    pub species: AnimalKind,
}

#[derive(Debug, Clone)]
pub struct PowerUpSpawn {
    pub x: f32,
    pub y: f32,
    pub boost: BoostKind,
}

/// Everything a level contains, laid out but not yet spawned.
#[derive(Debug, Clone, Default)]
pub struct LevelPlan {
    pub fruits: Vec<FruitSpawn>,
    pub animals: Vec<AnimalSpawn>,
    pub power_ups: SmallVec<[PowerUpSpawn; 2]>,
    pub obstacles: SmallVec<[f32; 8]>,
    pub trees: Vec<f32>,
}

impl LevelPlan {
    /// World-space X past the last spawned entity, used for tree placement.
    fn extent(&self) -> f32 {
        let last_fruit = self.fruits.last().map(|f| f.x).unwrap_or(0.0);
        let last_animal = self.animals.last().map(|a| a.x).unwrap_or(0.0);
        last_fruit.max(last_animal)
    }
}

/// Lays out a level. Fruit count and animal count grow linearly with the
/// level number; power-ups appear only on every third level; obstacles
/// start appearing at level 2.
pub fn plan_level(level: u32, rng: &mut SmallRng) -> LevelPlan {
    let mut plan = LevelPlan::default();
    let game_speed = 1 + (level - 1) / 3;

    for i in 0..(10 + level * 3) {
        plan.fruits.push(FruitSpawn {
            x: (200 + i * 120 + rng.random_range(0..80)) as f32,
            y: GROUND_Y - 30.0 - rng.random_range(0..50) as f32,
            color: FruitColor::pick(rng),
        });
    }

    for i in 0..(3 + level * 2) {
        plan.animals.push(AnimalSpawn {
            x: (300 + i * 250 + rng.random_range(0..100)) as f32,
            species: AnimalKind::pick(rng),
        });
    }

    if level % 3 == 0 {
        for i in 0..2u32 {
            plan.power_ups.push(PowerUpSpawn {
                x: (400 + i * 300 + rng.random_range(0..100)) as f32,
                y: GROUND_Y - 30.0 - rng.random_range(0..30) as f32,
                boost: BoostKind::pick(rng),
            });
        }
    }

    if level >= 2 {
        for i in 0..level {
            plan.obstacles
                .push((500 + i * 200 + rng.random_range(0..100)) as f32);
        }
    }

    // Background scenery stretches a little past the last entity.
    let extent = plan.extent() + 400.0;
    let mut x = 100.0;
    while x < extent {
        plan.trees.push(x + rng.random_range(0..60) as f32);
        x += TREE_SPACING;
    }

    tracing::info!(
        level,
        game_speed,
        fruits = plan.fruits.len(),
        animals = plan.animals.len(),
        power_ups = plan.power_ups.len(),
        obstacles = plan.obstacles.len(),
        "Level planned"
    );

    plan
}

/// Spawns every entity in the plan. All of them carry `LevelEntity` so a
/// level transition can clear them in one query.
pub fn spawn_level(commands: &mut Commands, plan: &LevelPlan, game_speed: u32) {
    for tree_x in &plan.trees {
        commands.spawn(TreeBundle::new(*tree_x));
    }

    for fruit in &plan.fruits {
        commands.spawn(FruitBundle::new(fruit.x, fruit.y, fruit.color));
    }

    for animal in &plan.animals {
        commands.spawn(AnimalBundle::new(animal.x, animal.species, game_speed));
    }

    for power_up in &plan.power_ups {
        commands.spawn(PowerUpBundle::new(power_up.x, power_up.y, power_up.boost));
    }

    for obstacle_x in &plan.obstacles {
        commands.spawn(ObstacleBundle::new(*obstacle_x));
    }
}
