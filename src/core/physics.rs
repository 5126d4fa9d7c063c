//! Collision groups shared by every physics body in the game.

use bevy_rapier2d::prelude::*;

pub const GROUND_GROUP: Group = Group::GROUP_1;
pub const ENEMY_GROUP: Group = Group::GROUP_2;
pub const PLAYER_GROUP: Group = Group::GROUP_3;
pub const PROJECTILE_GROUP: Group = Group::GROUP_4;

/// Groups for level geometry. Everything collides with the ground.
pub fn ground_groups() -> CollisionGroups {
    CollisionGroups::new(GROUND_GROUP, Group::ALL)
}

/// Groups for enemy bodies. Enemies walk through each other.
pub fn enemy_groups() -> CollisionGroups {
    CollisionGroups::new(ENEMY_GROUP, GROUND_GROUP | PLAYER_GROUP)
}

/// Groups for the player body.
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER_GROUP, Group::ALL)
}

/// Groups for enemy projectiles. Arrows only care about the player and walls.
pub fn projectile_groups() -> CollisionGroups {
    CollisionGroups::new(PROJECTILE_GROUP, GROUND_GROUP | PLAYER_GROUP)
}
