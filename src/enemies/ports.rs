//! The outside world as seen by an enemy brain.
//!
//! The brain never touches physics, animation or other entities directly. It
//! reads the clock and its own body through [`EnemyPorts`] and issues commands
//! back through it. The ECS adapter lives in `io.rs`; tests use the recording
//! double in [`testing`].

use bevy::prelude::*;

use super::state::EnemyState;
use crate::core::DamageType;

/// A projectile launch request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileShot {
    pub origin: Vec2,
    pub velocity: Vec2,
    /// Sprite is mirrored (enemy faces left).
    pub mirrored: bool,
    /// Seconds before the projectile removes itself.
    pub lifetime: f32,
    pub damage: u32,
    pub kind: DamageType,
}

/// Capabilities an enemy brain calls into.
pub trait EnemyPorts {
    /// Monotonic game time in seconds.
    fn now(&self) -> f32;

    fn position(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    /// Fire-and-forget.
    fn set_velocity(&mut self, velocity: Vec2);

    /// Whether the ground sensor in front of the feet overlaps ground.
    fn ground_ahead(&self) -> bool;

    /// Idempotent, last write wins.
    fn set_flag(&mut self, state: EnemyState, on: bool);

    /// Orientation changed; rotate the visuals to match.
    fn turn_around(&mut self, facing_right: bool);

    /// Freeze the body and stop it taking part in collisions.
    fn disable_body(&mut self);

    fn health_changed(&mut self, current: u32, maximum: u32);

    fn deliver_damage(&mut self, target: Entity, amount: u32, kind: DamageType);

    fn spawn_projectile(&mut self, shot: ProjectileShot);

    /// Death finalisation is complete; the owner can drop the entity.
    fn destroyed(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every command so tests can assert on side effects.
    #[derive(Debug, Default)]
    pub struct RecordingPorts {
        pub now: f32,
        pub position: Vec2,
        pub velocity: Vec2,
        pub grounded: bool,
        pub flags: [bool; EnemyState::COUNT],
        pub flag_writes: Vec<(EnemyState, bool)>,
        pub velocity_writes: Vec<Vec2>,
        pub turns: Vec<bool>,
        pub body_disabled: bool,
        pub health_updates: Vec<(u32, u32)>,
        pub damage_dealt: Vec<(Entity, u32, DamageType)>,
        pub shots: Vec<ProjectileShot>,
        pub destroyed: u32,
    }

    impl RecordingPorts {
        pub fn new() -> Self {
            Self {
                grounded: true,
                ..Default::default()
            }
        }

        pub fn flag(&self, state: EnemyState) -> bool {
            self.flags[state.index()]
        }

        /// Total number of commands issued so far.
        pub fn side_effects(&self) -> usize {
            self.flag_writes.len()
                + self.velocity_writes.len()
                + self.turns.len()
                + self.health_updates.len()
                + self.damage_dealt.len()
                + self.shots.len()
                + self.destroyed as usize
                + usize::from(self.body_disabled)
        }
    }

    impl EnemyPorts for RecordingPorts {
        fn now(&self) -> f32 {
            self.now
        }

        fn position(&self) -> Vec2 {
            self.position
        }

        fn velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
            self.velocity_writes.push(velocity);
        }

        fn ground_ahead(&self) -> bool {
            self.grounded
        }

        fn set_flag(&mut self, state: EnemyState, on: bool) {
            self.flags[state.index()] = on;
            self.flag_writes.push((state, on));
        }

        fn turn_around(&mut self, facing_right: bool) {
            self.turns.push(facing_right);
        }

        fn disable_body(&mut self) {
            self.body_disabled = true;
        }

        fn health_changed(&mut self, current: u32, maximum: u32) {
            self.health_updates.push((current, maximum));
        }

        fn deliver_damage(&mut self, target: Entity, amount: u32, kind: DamageType) {
            self.damage_dealt.push((target, amount, kind));
        }

        fn spawn_projectile(&mut self, shot: ProjectileShot) {
            self.shots.push(shot);
        }

        fn destroyed(&mut self) {
            self.destroyed += 1;
        }
    }
}
