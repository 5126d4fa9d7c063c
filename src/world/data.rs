//! Arena data structures and RON loading.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

const ARENA_PATH: &str = "assets/data/arena.ron";

/// A static rectangle the player and enemies stand on.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    /// Centre of the platform.
    pub position: (f32, f32),
    pub size: (f32, f32),
}

/// One enemy placed in the arena.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawnDef {
    /// Registry key, matching a file in `assets/data/enemies/`.
    pub enemy_type: String,
    pub position: (f32, f32),
}

/// The arena: platforms, the player's start and the enemy roster.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct ArenaLayout {
    pub name: String,
    pub player_spawn: (f32, f32),
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            name: "Training Ground".to_string(),
            player_spawn: (-6.0, 0.5),
            platforms: vec![
                PlatformDef {
                    position: (0.0, -1.0),
                    size: (30.0, 1.0),
                },
                PlatformDef {
                    position: (8.0, 2.0),
                    size: (6.0, 0.5),
                },
            ],
            enemies: vec![
                EnemySpawnDef {
                    enemy_type: "grunt".to_string(),
                    position: (2.0, 0.5),
                },
                EnemySpawnDef {
                    enemy_type: "archer".to_string(),
                    position: (8.0, 3.5),
                },
            ],
        }
    }
}

/// Read and parse one RON file.
pub fn read_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Load the arena layout, falling back to the built-in one.
pub fn load_arena_layout(mut commands: Commands) {
    let layout = match read_ron_file::<ArenaLayout>(Path::new(ARENA_PATH)) {
        Ok(layout) => {
            info!(
                "Loaded arena '{}': {} platforms, {} enemies",
                layout.name,
                layout.platforms.len(),
                layout.enemies.len()
            );
            layout
        }
        Err(e) => {
            warn!("{}, using built-in arena", e);
            ArenaLayout::default()
        }
    };

    commands.insert_resource(layout);
}
