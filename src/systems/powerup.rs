use bevy_ecs::system::Query;

use crate::constants::animation;
use crate::systems::components::Bobbing;

/// Floats every power-up up and down. The offset is cosmetic only; the
/// collision box stays at the spawn position.
pub fn powerup_bob(mut query: Query<&mut Bobbing>) {
    for mut bob in query.iter_mut() {
        bob.offset += bob.direction;
        if bob.offset > animation::BOB_LIMIT {
            bob.direction = -1;
        } else if bob.offset < -animation::BOB_LIMIT {
            bob.direction = 1;
        }
    }
}
