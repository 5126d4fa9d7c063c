//! Hollow Ridge - a 2D side-on arena of patrolling, shooting enemies in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, collision groups
//! - **Combat**: Health pools and damage intake for the player
//! - **Enemies**: The enemy state machine, archer variant, projectiles
//! - **Player**: The damageable target enemies hunt
//! - **World**: Arena layout loading and construction
//! - **UI**: Player HUD, enemy health overlays, game over screen

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct HollowRidgePlugin;

impl Plugin for HollowRidgePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
