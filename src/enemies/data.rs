//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::animation::{ClipTiming, StateClips};
use super::archer::{Archer, DEFAULT_PROJECTILE_LIFETIME, DEFAULT_SCAN_INTERVAL};
use super::components::EnemyConfig;
use super::error::EnemyError;
use super::state::EnemyState;
use crate::core::DamageType;
use crate::world::read_ron_file;

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.4,
            radius: 0.3,
        }
    }
}

/// Clip timing for one state.
#[derive(Deserialize, Clone, Debug)]
pub struct ClipDefinition {
    pub state: EnemyState,
    #[serde(default)]
    pub action_at: Option<f32>,
    #[serde(default)]
    pub length: Option<f32>,
}

impl ClipDefinition {
    pub fn timing(&self) -> ClipTiming {
        ClipTiming {
            action_at: self.action_at,
            length: self.length,
        }
    }
}

/// Ranged attack block. Its presence makes the enemy an archer.
#[derive(Deserialize, Clone, Debug)]
pub struct ArcherDefinition {
    pub anger_range: f32,
    pub arrow_speed: f32,
    pub shoot_point: (f32, f32),
    #[serde(default = "default_projectile_damage")]
    pub projectile_damage: u32,
    #[serde(default = "default_projectile_kind")]
    pub projectile_kind: DamageType,
    #[serde(default = "default_projectile_lifetime")]
    pub projectile_lifetime: f32,
    #[serde(default = "default_scan_interval")]
    pub scan_interval: f32,
}

impl ArcherDefinition {
    pub fn to_behavior(&self) -> Archer {
        Archer::new(
            self.anger_range,
            self.arrow_speed,
            Vec2::new(self.shoot_point.0, self.shoot_point.1),
        )
        .with_projectile(
            self.projectile_damage,
            self.projectile_kind,
            self.projectile_lifetime,
        )
        .with_scan_interval(self.scan_interval)
    }
}

fn default_projectile_damage() -> u32 {
    1
}

fn default_projectile_kind() -> DamageType {
    DamageType::Piercing
}

fn default_projectile_lifetime() -> f32 {
    DEFAULT_PROJECTILE_LIFETIME
}

fn default_scan_interval() -> f32 {
    DEFAULT_SCAN_INTERVAL
}

fn default_collision_time_delay() -> f32 {
    1.0
}

fn default_ground_check() -> (f32, f32) {
    (0.45, -0.85)
}

fn default_death_duration() -> f32 {
    1.0
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_hp: u32,
    pub min_state_time: f32,
    pub max_state_time: f32,
    pub available_states: Vec<EnemyState>,
    pub speed: f32,
    #[serde(default)]
    pub range: f32,
    #[serde(default)]
    pub collision_damage: u32,
    #[serde(default)]
    pub collision_damage_type: DamageType,
    #[serde(default = "default_collision_time_delay")]
    pub collision_time_delay: f32,
    #[serde(default)]
    pub collider: ColliderConfig,
    /// Ledge check offset from the body centre, facing right.
    #[serde(default = "default_ground_check")]
    pub ground_check: (f32, f32),
    #[serde(default)]
    pub clips: Vec<ClipDefinition>,
    /// Seconds the body lingers in `Death` before removal.
    #[serde(default = "default_death_duration")]
    pub death_duration: f32,
    /// Fixed RNG seed. Spawns derive one from their index otherwise.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub archer: Option<ArcherDefinition>,
}

impl EnemyDefinition {
    /// Convert to the state machine configuration.
    pub fn to_config(&self) -> EnemyConfig {
        EnemyConfig {
            name: self.name.clone(),
            max_hp: self.max_hp,
            min_state_time: self.min_state_time,
            max_state_time: self.max_state_time,
            available_states: self.available_states.clone(),
            speed: self.speed,
            range: self.range,
            collision_damage: self.collision_damage,
            collision_damage_type: self.collision_damage_type,
            collision_time_delay: self.collision_time_delay,
        }
    }

    /// Check everything the brain and the clip dispatcher rely on.
    pub fn validate(&self) -> Result<(), EnemyError> {
        self.to_config().validate()?;

        if self.archer.is_some() {
            // Only the Shoot clip fires the arrow and ends the state
            let shoot = self.clips.iter().find(|clip| clip.state == EnemyState::Shoot);
            if !shoot.is_some_and(|clip| clip.action_at.is_some() && clip.length.is_some()) {
                return Err(EnemyError::IncompleteShootClip {
                    name: self.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Clip timings, with the death clip lasting `death_duration`.
    pub fn state_clips(&self) -> StateClips {
        self.clips
            .iter()
            .fold(StateClips::new(self.death_duration), |clips, clip| {
                clips.with(clip.state, clip.timing())
            })
    }

    /// Melee patroller used when no data files are present.
    pub fn builtin_grunt() -> Self {
        Self {
            name: "Grunt".to_string(),
            max_hp: 20,
            min_state_time: 1.0,
            max_state_time: 3.0,
            available_states: vec![
                EnemyState::Idle,
                EnemyState::Move,
                EnemyState::Strike,
                EnemyState::PowerStrike,
            ],
            speed: 2.0,
            range: 4.0,
            collision_damage: 2,
            collision_damage_type: DamageType::Casual,
            collision_time_delay: default_collision_time_delay(),
            collider: ColliderConfig::default(),
            ground_check: default_ground_check(),
            clips: vec![
                ClipDefinition {
                    state: EnemyState::Strike,
                    action_at: None,
                    length: Some(0.6),
                },
                ClipDefinition {
                    state: EnemyState::PowerStrike,
                    action_at: None,
                    length: Some(0.9),
                },
            ],
            death_duration: default_death_duration(),
            seed: None,
            archer: None,
        }
    }

    /// Archer used when no data files are present.
    pub fn builtin_archer() -> Self {
        Self {
            name: "Archer".to_string(),
            max_hp: 10,
            available_states: vec![EnemyState::Idle, EnemyState::Move],
            range: 3.0,
            collision_damage: 1,
            clips: vec![ClipDefinition {
                state: EnemyState::Shoot,
                action_at: Some(0.4),
                length: Some(0.8),
            }],
            archer: Some(ArcherDefinition {
                anger_range: 5.0,
                arrow_speed: 8.0,
                shoot_point: (0.5, 0.25),
                projectile_damage: default_projectile_damage(),
                projectile_kind: default_projectile_kind(),
                projectile_lifetime: default_projectile_lifetime(),
                scan_interval: default_scan_interval(),
            }),
            ..Self::builtin_grunt()
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default, Clone)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Registry with the built-in `grunt` and `archer` types.
    pub fn with_builtins() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert("grunt".to_string(), EnemyDefinition::builtin_grunt());
        definitions.insert("archer".to_string(), EnemyDefinition::builtin_archer());
        Self { definitions }
    }

    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
///
/// Files override the built-in types of the same name.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");
    *registry = EnemyRegistry::with_builtins();

    if !enemies_dir.exists() {
        warn!(
            "Enemy definitions directory not found: {:?}, using built-in enemies",
            enemies_dir
        );
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory, using built-in enemies");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match read_ron_file::<EnemyDefinition>(&path) {
                Ok(definition) => match definition.validate() {
                    Ok(()) => {
                        info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                        registry.definitions.insert(enemy_type, definition);
                    }
                    Err(e) => error!("Rejected enemy definition {:?}: {}", path, e),
                },
                Err(e) => error!("{}", e),
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
