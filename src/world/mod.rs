//! World module - the arena the fight takes place in.

mod data;
mod error;
mod plugin;
mod spawning;

pub use data::{read_ron_file, ArenaLayout, EnemySpawnDef, PlatformDef};
pub use error::DataLoadError;
pub use plugin::{setup_arena, WorldPlugin};
pub use spawning::{spawn_platform, ArenaGeometry};
