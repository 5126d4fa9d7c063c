//! Enemy AI systems: autonomous ticks, physics steps, aggro scans, contact
//! damage and damage intake.
//!
//! All brain clocks read `Time<Virtual>` so the per-frame and fixed-step
//! systems compare against the same time base.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::archer::Archer;
use super::behavior::EnemyBehavior;
use super::brain::EnemyBrain;
use super::components::{AnimationFlags, Enemy, Facing, GroundSensor};
use super::error::EnemyError;
use super::io::{drive_enemy, EnemyPortsQuery};
use crate::combat::Dead;
use crate::core::physics::GROUND_GROUP;
use crate::core::DamageEvent;
use crate::player::Player;

/// Re-roll the behaviour state once the dwell time runs out.
pub fn enemy_tick<B: EnemyBehavior>(
    time: Res<Time<Virtual>>,
    mut commands: Commands,
    mut enemies: Query<EnemyPortsQuery<B>, With<Enemy>>,
) {
    let now = time.elapsed_secs();
    for item in enemies.iter_mut() {
        drive_enemy(&mut commands, now, item, |brain, ports| brain.tick(ports));
    }
}

/// Sample the ledge check point in front of each enemy.
pub fn sense_ground(
    rapier_context: Query<&RapierContext>,
    mut enemies: Query<(Entity, &Transform, &Facing, &mut GroundSensor), With<Enemy>>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let filter = QueryFilter::default()
        .exclude_sensors()
        .groups(CollisionGroups::new(Group::ALL, GROUND_GROUP));

    for (entity, transform, facing, mut sensor) in enemies.iter_mut() {
        let point = sensor.sample_point(transform.translation.truncate(), *facing);
        let mut grounded = false;
        context.intersections_with_point(point, filter.exclude_collider(entity), |_| {
            grounded = true;
            false
        });
        sensor.grounded = grounded;
    }
}

/// Fixed-step movement and ledge turning.
pub fn enemy_physics_step<B: EnemyBehavior>(
    time: Res<Time<Virtual>>,
    mut commands: Commands,
    mut enemies: Query<EnemyPortsQuery<B>, With<Enemy>>,
) {
    let now = time.elapsed_secs();
    for item in enemies.iter_mut() {
        drive_enemy(&mut commands, now, item, |brain, ports| {
            brain.physics_step(ports)
        });
    }
}

/// Periodic proximity scan for archers.
pub fn archer_scan(
    time: Res<Time<Virtual>>,
    mut commands: Commands,
    player_query: Query<&Transform, (With<Player>, Without<Dead>, Without<Enemy>)>,
    mut archers: Query<EnemyPortsQuery<Archer>, (With<Enemy>, Without<Player>)>,
) {
    let now = time.elapsed_secs();
    let player = player_query
        .get_single()
        .ok()
        .map(|transform| transform.translation.truncate());

    for item in archers.iter_mut() {
        drive_enemy(&mut commands, now, item, |brain, ports| {
            brain.scan_for_player(player, ports)
        });
    }
}

/// Forward physics contacts to the brains involved.
pub fn enemy_collisions<B: EnemyBehavior>(
    time: Res<Time<Virtual>>,
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    players: Query<(), With<Player>>,
    mut enemies: Query<EnemyPortsQuery<B>, With<Enemy>>,
) {
    let now = time.elapsed_secs();
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        for (enemy, other) in [(a, b), (b, a)] {
            let Ok(item) = enemies.get_mut(enemy) else {
                continue;
            };
            let player = players.contains(other).then_some(other);
            drive_enemy(&mut commands, now, item, |brain, ports| {
                brain.on_collision(player, ports)
            });
        }
    }
}

/// Apply damage events that target enemies.
pub fn apply_enemy_damage<B: EnemyBehavior>(
    time: Res<Time<Virtual>>,
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut enemies: Query<EnemyPortsQuery<B>, With<Enemy>>,
) {
    let now = time.elapsed_secs();
    for event in damage_events.read() {
        let Ok(item) = enemies.get_mut(event.target) else {
            continue;
        };
        drive_enemy(&mut commands, now, item, |brain, ports| {
            brain.take_damage(event.amount, event.kind, event.source, ports)
        });
    }
}

/// Report and remove brains spawned without the components they drive.
pub fn audit_enemy_ports<B: EnemyBehavior>(
    mut commands: Commands,
    added: Query<
        (
            Entity,
            Has<Velocity>,
            Has<AnimationFlags>,
            Has<Facing>,
            Has<GroundSensor>,
        ),
        Added<EnemyBrain<B>>,
    >,
) {
    for (entity, velocity, flags, facing, sensor) in added.iter() {
        let missing = [
            (velocity, "velocity"),
            (flags, "animation"),
            (facing, "facing"),
            (sensor, "ground sensor"),
        ]
        .into_iter()
        .find_map(|(present, port)| (!present).then_some(port));

        if let Some(port) = missing {
            error!("{}", EnemyError::MissingPort { entity, port });
            commands.entity(entity).despawn_recursive();
        }
    }
}
