//! Enemy-related components.

use bevy::prelude::*;

use super::error::EnemyError;
use super::state::EnemyState;
use crate::core::DamageType;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Tuning shared by every enemy variant, built from its definition file.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyConfig {
    pub name: String,
    pub max_hp: u32,
    /// Dwell time window for autonomous re-rolls, in seconds.
    pub min_state_time: f32,
    pub max_state_time: f32,
    /// Pool the autonomous re-roll draws from.
    pub available_states: Vec<EnemyState>,
    pub speed: f32,
    /// Patrol half-width around the spawn point. Zero disables the bound.
    pub range: f32,
    pub collision_damage: u32,
    pub collision_damage_type: DamageType,
    /// Minimum seconds between two contact hits.
    pub collision_time_delay: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            name: "enemy".to_string(),
            max_hp: 10,
            min_state_time: 1.0,
            max_state_time: 3.0,
            available_states: vec![EnemyState::Idle, EnemyState::Move],
            speed: 2.0,
            range: 0.0,
            collision_damage: 1,
            collision_damage_type: DamageType::Casual,
            collision_time_delay: 1.0,
        }
    }
}

impl EnemyConfig {
    /// Reject configurations the state machine cannot run with.
    pub fn validate(&self) -> Result<(), EnemyError> {
        if self.max_hp == 0 {
            return Err(EnemyError::ZeroMaxHp {
                name: self.name.clone(),
            });
        }

        if self.available_states.is_empty() {
            return Err(EnemyError::EmptyStatePool {
                name: self.name.clone(),
            });
        }

        if let Some(&state) = self
            .available_states
            .iter()
            .find(|s| matches!(s, EnemyState::Death | EnemyState::Hurt))
        {
            return Err(EnemyError::ForbiddenPoolState {
                name: self.name.clone(),
                state,
            });
        }

        let window_ok = self.min_state_time >= 0.0
            && self.min_state_time.is_finite()
            && self.max_state_time.is_finite()
            && self.min_state_time <= self.max_state_time;
        if !window_ok {
            return Err(EnemyError::InvalidStateWindow {
                name: self.name.clone(),
                min: self.min_state_time,
                max: self.max_state_time,
            });
        }

        Ok(())
    }
}

/// Animation parameters, one boolean per state. Playback reads these.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct AnimationFlags([bool; EnemyState::COUNT]);

impl AnimationFlags {
    pub fn set(&mut self, state: EnemyState, on: bool) {
        self.0[state.index()] = on;
    }

    pub fn get(&self, state: EnemyState) -> bool {
        self.0[state.index()]
    }

    /// States whose flag is currently raised.
    pub fn raised(&self) -> impl Iterator<Item = EnemyState> + '_ {
        EnemyState::ALL.into_iter().filter(|s| self.get(*s))
    }
}

/// Left/right orientation mirrored from the brain for visuals and sensors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    pub right: bool,
}

impl Default for Facing {
    fn default() -> Self {
        Self { right: true }
    }
}

impl Facing {
    pub fn sign(&self) -> f32 {
        if self.right {
            1.0
        } else {
            -1.0
        }
    }
}

/// Point check just ahead of the feet that detects ledges.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundSensor {
    /// Offset from the body centre when facing right.
    pub offset: Vec2,
    pub grounded: bool,
}

impl GroundSensor {
    pub fn new(offset: Vec2) -> Self {
        Self {
            offset,
            grounded: true,
        }
    }

    /// World-space check point for a body at `origin`.
    pub fn sample_point(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + Vec2::new(self.offset.x * facing.sign(), self.offset.y)
    }
}

/// Child entity carrying the enemy's sprite. Rotated to match [`Facing`].
#[derive(Component)]
pub struct EnemyVisual;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EnemyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_pool() {
        let config = EnemyConfig {
            available_states: vec![],
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnemyError::EmptyStatePool { .. })
        ));
    }

    #[test]
    fn rejects_death_in_pool() {
        let config = EnemyConfig {
            available_states: vec![EnemyState::Move, EnemyState::Death],
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(EnemyError::ForbiddenPoolState {
                name: "enemy".to_string(),
                state: EnemyState::Death,
            })
        );
    }

    #[test]
    fn rejects_inverted_window() {
        let config = EnemyConfig {
            min_state_time: 4.0,
            max_state_time: 2.0,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnemyError::InvalidStateWindow { .. })
        ));
    }

    #[test]
    fn rejects_zero_hp() {
        let config = EnemyConfig {
            max_hp: 0,
            ..default()
        };
        assert!(matches!(config.validate(), Err(EnemyError::ZeroMaxHp { .. })));
    }

    #[test]
    fn sample_point_mirrors_with_facing() {
        let sensor = GroundSensor::new(Vec2::new(0.5, -1.0));
        let left = Facing { right: false };
        assert_eq!(
            sensor.sample_point(Vec2::new(2.0, 0.0), Facing::default()),
            Vec2::new(2.5, -1.0)
        );
        assert_eq!(sensor.sample_point(Vec2::new(2.0, 0.0), left), Vec2::new(1.5, -1.0));
    }

    #[test]
    fn flags_report_raised_states() {
        let mut flags = AnimationFlags::default();
        flags.set(EnemyState::Shoot, true);
        flags.set(EnemyState::Hurt, true);
        flags.set(EnemyState::Hurt, false);
        assert_eq!(flags.raised().collect::<Vec<_>>(), vec![EnemyState::Shoot]);
    }
}
