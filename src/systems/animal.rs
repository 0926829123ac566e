use bevy_ecs::system::{Query, ResMut};
use rand::Rng;

use crate::constants::{animation, patrol};
use crate::systems::components::{Facing, GameRng, Patrol, Position, WalkCycle};

/// Advances every animal's patrol: walk-cycle animation, a step in the
/// current direction, a hard reversal at the patrol boundary, and a small
/// chance of a random reversal once the animal has walked one way for a
/// while.
pub fn animal_patrol(
    mut rng: ResMut<GameRng>,
    mut query: Query<(&mut Position, &mut Patrol, &mut WalkCycle, &mut Facing)>,
) {
    for (mut position, mut patrol_state, mut walk, mut facing) in query.iter_mut() {
        walk.advance(animation::ANIMAL_WALK_TICKS, animation::WALK_FRAMES);

        patrol_state.move_timer += 1;
        position.0.x += patrol_state.direction * patrol_state.speed;

        let strayed = (position.0.x - patrol_state.start_x).abs() > patrol::DISTANCE;
        if strayed {
            patrol_state.reverse();
        }

        if patrol_state.move_timer > patrol::RESTLESS_TICKS
            && rng.0.random_range(0..100) < patrol::RANDOM_FLIP_PERCENT
        {
            patrol_state.reverse();
        }

        *facing = if patrol_state.direction >= 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
    }
}
