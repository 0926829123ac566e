use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;

use crate::audio::Cue;
use crate::events::AudioEvent;
use crate::systems::components::{
    BoostKind, BoostTimers, Collider, CurrentLevel, EntityKind, HazardCollider, PickupCollider,
    PlayerCollider, PlayerLives, Position, ScoreResource,
};

/// Axis-aligned overlap test. Boxes that merely touch edges do not count.
pub fn intersects(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Resolves all player-versus-world overlaps for this tick, in a fixed
/// order: fruits, power-ups, obstacles, animals.
///
/// The invulnerability state consulted by the two damage passes is sampled
/// once, after the power-up pass. A shield collected this tick blocks both
/// hazard classes; a hit from an obstacle does not blunt a simultaneous
/// animal hit, so both can land in the same tick.
pub fn collision_system(
    mut commands: Commands,
    mut score: ResMut<ScoreResource>,
    mut lives: ResMut<PlayerLives>,
    level: Res<CurrentLevel>,
    mut audio_events: EventWriter<AudioEvent>,
    mut player: Query<(&Position, &Collider, &mut BoostTimers), With<PlayerCollider>>,
    pickups: Query<(Entity, &Position, &Collider, &EntityKind), With<PickupCollider>>,
    hazards: Query<
        (&Position, &Collider, &EntityKind),
        (With<HazardCollider>, Without<PlayerCollider>),
    >,
) {
    let Ok((player_pos, player_collider, mut boosts)) = player.single_mut() else {
        return;
    };
    let player_pos = player_pos.0;
    let player_size = player_collider.size;

    for (entity, position, collider, kind) in pickups.iter() {
        if !intersects(player_pos, player_size, position.0, collider.size) {
            continue;
        }

        match kind {
            EntityKind::Fruit(_) => {
                score.0 += 10 + level.0 * 2;
            }
            EntityKind::PowerUp(boost) => {
                score.0 += 25;
                match boost {
                    BoostKind::Speed => boosts.grant_speed(),
                    BoostKind::Jump => boosts.grant_jump(),
                    BoostKind::ExtraLife => lives.grant_extra(),
                    BoostKind::Invulnerability => boosts.grant_shield(),
                }
            }
            _ => continue,
        }

        tracing::debug!(kind = ?kind, score = score.0, "Collected");
        commands.entity(entity).despawn();
        audio_events.write(AudioEvent::Play(Cue::Collect));
    }

    let shielded = boosts.is_shielded();
    if shielded {
        return;
    }

    // At most one hit per hazard class per tick; an obstacle hit does not
    // blunt a simultaneous animal hit.
    for obstacle_pass in [true, false] {
        let hit = hazards.iter().any(|(position, collider, kind)| {
            matches!(kind, EntityKind::Obstacle) == obstacle_pass
                && intersects(player_pos, player_size, position.0, collider.size)
        });

        if hit {
            boosts.apply_hit();
            lives.lose_one();
            let class = if obstacle_pass { "obstacle" } else { "animal" };
            tracing::debug!(class, lives = lives.0, "Player hit");
            audio_events.write(AudioEvent::Play(Cue::Hit));
        }
    }
}
