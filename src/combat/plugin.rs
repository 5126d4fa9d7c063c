//! Combat plugin - damage delivery to the player.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles damage that targets the player.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
