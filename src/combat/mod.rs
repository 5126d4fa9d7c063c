//! Combat module - health pools and damage delivery to the player.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
