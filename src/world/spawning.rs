//! Entity spawning functions for arena construction.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::PlatformDef;
use crate::core::physics::ground_groups;

/// Marker for everything the arena owns, so it can be cleaned up together.
#[derive(Component)]
pub struct ArenaGeometry;

/// Spawn a static platform.
pub fn spawn_platform(commands: &mut Commands, platform: &PlatformDef) -> Entity {
    let size = Vec2::new(platform.size.0, platform.size.1);
    commands
        .spawn((
            Sprite {
                color: Color::srgb(0.3, 0.28, 0.25),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(platform.position.0, platform.position.1, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            ground_groups(),
            ArenaGeometry,
        ))
        .id()
}
