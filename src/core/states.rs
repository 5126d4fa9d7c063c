//! Game state definitions that control the overall flow of the game.
//!
//! AI, damage and projectile systems only run in `InGame`; the other states
//! exist so data can load before anything is spawned and so the player's
//! death stops the world.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while enemy and arena data files are read
/// - Move to `InGame` once the data is available
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
}
