//! Errors raised while constructing enemies.

use bevy::prelude::Entity;
use thiserror::Error;

use super::state::EnemyState;

/// Construction-time contract violations. None of these can happen to an
/// enemy that is already running.
#[derive(Debug, Error, PartialEq)]
pub enum EnemyError {
    /// The random state pool has no members.
    #[error("Enemy '{name}' has no available states")]
    EmptyStatePool { name: String },

    /// A state that must never be picked at random is in the pool.
    #[error("Enemy '{name}' lists {state} as a random state")]
    ForbiddenPoolState { name: String, state: EnemyState },

    /// Dwell time window is inverted or negative.
    #[error("Enemy '{name}' has invalid state time window [{min}, {max}]")]
    InvalidStateWindow { name: String, min: f32, max: f32 },

    /// Maximum hit points must be positive.
    #[error("Enemy '{name}' has zero max HP")]
    ZeroMaxHp { name: String },

    /// A ranged enemy needs a `Shoot` clip with both a release time and a
    /// length, or it can never fire nor leave `Shoot`.
    #[error("Enemy '{name}' shoots but its Shoot clip lacks an action time or length")]
    IncompleteShootClip { name: String },

    /// No definition was loaded for this enemy type.
    #[error("Unknown enemy type: {0}")]
    UnknownType(String),

    /// An entity with a brain is missing one of the components it drives.
    #[error("Enemy {entity} is missing its {port} port")]
    MissingPort { entity: Entity, port: &'static str },
}
