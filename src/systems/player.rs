use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{Query, Res},
};

use crate::audio::Cue;
use crate::constants::{animation, mechanics, GROUND_Y};
use crate::events::AudioEvent;
use crate::systems::components::{
    BoostTimers, Collider, Facing, Grounded, InputSnapshot, PlayerControlled, Position, Velocity,
    WalkCycle,
};

/// Advances the player one tick: horizontal movement from held keys, jump
/// initiation, gravity, ground clamping, then boost timer decay.
///
/// Order matters. Jumps read the grounded flag from before gravity runs, so
/// a jump pressed on the landing tick takes effect immediately.
pub fn player_update(
    input: Res<InputSnapshot>,
    mut audio_events: EventWriter<AudioEvent>,
    mut query: Query<
        (
            &mut Position,
            &mut Velocity,
            &mut Grounded,
            &mut Facing,
            &mut WalkCycle,
            &mut BoostTimers,
            &Collider,
        ),
        With<PlayerControlled>,
    >,
) {
    let Ok((mut position, mut velocity, mut grounded, mut facing, mut walk, mut boosts, collider)) =
        query.single_mut()
    else {
        return;
    };

    let speed = boosts.current_speed();
    let mut moving = false;

    if input.left {
        position.0.x -= speed;
        *facing = Facing::Left;
        moving = true;
    }

    if input.right {
        position.0.x += speed;
        *facing = Facing::Right;
        moving = true;
    }

    if input.up && grounded.0 {
        velocity.y = boosts.current_jump_power();
        grounded.0 = false;
        audio_events.write(AudioEvent::Play(Cue::Jump));
    }

    if moving && grounded.0 {
        walk.advance(animation::PLAYER_WALK_TICKS, animation::WALK_FRAMES);
    } else {
        walk.reset();
    }

    velocity.y += mechanics::GRAVITY;
    position.0.y += velocity.y;

    let floor = GROUND_Y - collider.size.y;
    if position.0.y >= floor {
        position.0.y = floor;
        velocity.y = 0.0;
        grounded.0 = true;
    }

    boosts.tick();

    // The world has no left edge to run off of.
    if position.0.x < 0.0 {
        position.0.x = 0.0;
    }
}
