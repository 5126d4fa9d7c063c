//! Global events used for cross-system communication.
//!
//! Enemies never touch the player or the UI directly. Damage, health display
//! and removal all travel as events so each side stays independent and
//! testable.

use bevy::prelude::*;
use serde::Deserialize;

/// Kind of damage being dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum DamageType {
    #[default]
    Casual,
    Piercing,
    Fire,
    Poison,
}

/// Sent when something deals damage to an entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if any
    pub source: Option<Entity>,
    pub amount: u32,
    pub kind: DamageType,
}

/// Sent whenever an entity's externally displayed health changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub maximum: u32,
}

/// Sent once an enemy has finished dying and is about to leave the world.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDestroyed {
    pub entity: Entity,
}
