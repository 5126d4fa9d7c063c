//! Player module - the damageable target enemies hunt.

mod components;
mod spawning;

pub use components::*;
pub use spawning::spawn_player;
