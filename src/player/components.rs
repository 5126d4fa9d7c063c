//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Starting health for a freshly spawned player.
pub const PLAYER_MAX_HEALTH: u32 = 100;

/// Half extents of the player's box collider.
pub const PLAYER_HALF_SIZE: Vec2 = Vec2::new(0.3, 0.8);
