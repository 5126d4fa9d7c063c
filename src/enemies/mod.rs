//! Enemies module - the enemy state machine, its ECS adapter, and spawning.

mod ai;
pub mod animation;
pub mod archer;
mod behavior;
mod brain;
mod components;
pub mod data;
mod error;
mod io;
mod plugin;
mod ports;
pub mod projectile;
mod spawning;
mod state;

pub use behavior::{EnemyBehavior, Grunt, TickControl};
pub use brain::{EnemyBrain, StatePicker};
pub use components::*;
pub use data::EnemyRegistry;
pub use error::EnemyError;
pub use io::{drive_enemy, EnemyIo, EnemyPortsQuery};
pub use plugin::EnemyPlugin;
pub use ports::{EnemyPorts, ProjectileShot};
pub use spawning::spawn_enemy;
pub use state::EnemyState;
