//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DamageType};

/// Result of applying damage to a [`Health`] pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Hit points went down but the owner survives.
    Wounded,
    /// Hit points reached zero with this hit.
    Depleted,
    /// The owner was already dead, nothing changed.
    Ignored,
}

/// Integer hit points. `0 <= current <= maximum` always holds.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    maximum: u32,
}

impl Health {
    /// A full pool. A zero maximum is bumped to one so the invariant holds.
    pub fn new(max: u32) -> Self {
        let maximum = max.max(1);
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Subtract `amount`. A hit that would leave zero or less clamps to zero
    /// and reports [`DamageOutcome::Depleted`].
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }

        match self.current.checked_sub(amount) {
            Some(remaining) if remaining > 0 => {
                self.current = remaining;
                DamageOutcome::Wounded
            }
            _ => {
                self.current = 0;
                DamageOutcome::Depleted
            }
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.maximum as f32
    }
}

/// Marker component for entities that have died (prevents repeated deaths).
#[derive(Component)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_is_full() {
        let health = Health::new(10);
        assert_eq!(health.current(), 10);
        assert_eq!(health.maximum(), 10);
        assert!(!health.is_dead());
    }

    #[test]
    fn zero_maximum_is_promoted() {
        assert_eq!(Health::new(0).maximum(), 1);
    }

    #[test]
    fn damage_below_current_wounds() {
        let mut health = Health::new(10);
        assert_eq!(health.take_damage(4), DamageOutcome::Wounded);
        assert_eq!(health.current(), 6);
    }

    #[test]
    fn exact_lethal_damage_clamps_to_zero() {
        let mut health = Health::new(10);
        assert_eq!(health.take_damage(10), DamageOutcome::Depleted);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn overkill_never_goes_negative() {
        let mut health = Health::new(10);
        assert_eq!(health.take_damage(u32::MAX), DamageOutcome::Depleted);
        assert_eq!(health.current(), 0);
        assert_eq!(health.take_damage(3), DamageOutcome::Ignored);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn current_strictly_decreases_until_zero() {
        let mut health = Health::new(7);
        let mut previous = health.current();
        while !health.is_dead() {
            health.take_damage(2);
            assert!(health.current() < previous);
            assert!(health.current() <= health.maximum());
            previous = health.current();
        }
        assert_eq!(health.current(), 0);
    }
}
