//! Player spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Player, PLAYER_HALF_SIZE, PLAYER_MAX_HEALTH};
use crate::combat::Health;
use crate::core::physics::player_groups;

/// Spawn the player body at `position`.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    let player = commands
        .spawn((
            Player,
            Health::new(PLAYER_MAX_HEALTH),
            Sprite {
                color: Color::srgb(0.8, 0.8, 0.9),
                custom_size: Some(PLAYER_HALF_SIZE * 2.0),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
            // Rapier physics components
            RigidBody::Dynamic,
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED,
            Collider::cuboid(PLAYER_HALF_SIZE.x, PLAYER_HALF_SIZE.y),
            ActiveEvents::COLLISION_EVENTS,
            player_groups(),
        ))
        .id();

    info!("Spawned player at ({:.1}, {:.1})", position.x, position.y);
    player
}
