//! Enemy projectiles: spawning, expiry and hits.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::ports::ProjectileShot;
use crate::core::physics::projectile_groups;
use crate::core::{DamageEvent, DamageType};
use crate::player::Player;

/// A live projectile and the damage it carries.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub damage: u32,
    pub kind: DamageType,
    pub source: Option<Entity>,
}

/// Removes the entity once the timer finishes.
#[derive(Component)]
pub struct Lifetime(pub Timer);

/// Spawn a projectile for `shot`.
pub fn spawn_projectile(commands: &mut Commands, shot: ProjectileShot, source: Option<Entity>) -> Entity {
    commands
        .spawn((
            Projectile {
                damage: shot.damage,
                kind: shot.kind,
                source,
            },
            Lifetime(Timer::from_seconds(shot.lifetime, TimerMode::Once)),
            Sprite {
                color: Color::srgb(0.75, 0.65, 0.45),
                custom_size: Some(Vec2::new(0.6, 0.08)),
                flip_x: shot.mirrored,
                ..default()
            },
            Transform::from_translation(shot.origin.extend(1.0)),
            RigidBody::KinematicVelocityBased,
            Velocity::linear(shot.velocity),
            Collider::cuboid(0.3, 0.04),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            projectile_groups(),
        ))
        .id()
}

/// Despawn projectiles whose lifetime ran out.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime), With<Projectile>>,
) {
    for (entity, mut lifetime) in query.iter_mut() {
        lifetime.0.tick(time.delta());
        if lifetime.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// A projectile is consumed by the first thing it touches. Touching the
/// player also deals its damage.
pub fn projectile_hits(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    projectiles: Query<&Projectile>,
    players: Query<(), With<Player>>,
) {
    let mut consumed = HashSet::new();

    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        for (projectile_entity, other) in [(a, b), (b, a)] {
            let Ok(projectile) = projectiles.get(projectile_entity) else {
                continue;
            };
            if Some(other) == projectile.source || !consumed.insert(projectile_entity) {
                continue;
            }

            if players.contains(other) {
                commands.send_event(DamageEvent {
                    target: other,
                    source: projectile.source,
                    amount: projectile.damage,
                    kind: projectile.kind,
                });
            }
            commands.entity(projectile_entity).despawn_recursive();
        }
    }
}
