//! The enemy state machine shared by every variant.
//!
//! [`EnemyBrain`] owns the canonical transition protocol, the autonomous
//! re-roll cadence, facing, ledge handling, hit points and contact damage.
//! Variant specific behaviour plugs in through [`EnemyBehavior`].

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use super::behavior::{EnemyBehavior, TickControl};
use super::components::EnemyConfig;
use super::error::EnemyError;
use super::ports::EnemyPorts;
use super::state::EnemyState;
use crate::combat::{DamageOutcome, DamageType, Health};

/// Source of randomness for state selection.
pub trait StatePicker: Send + Sync {
    /// Uniform index in `0..len`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform dwell time in `[min, max]`.
    fn pick_delay(&mut self, min: f32, max: f32) -> f32;
}

impl StatePicker for StdRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn pick_delay(&mut self, min: f32, max: f32) -> f32 {
        self.gen_range(min..=max)
    }
}

/// The Enemy aggregate: state, timers, facing and hit points.
#[derive(Component)]
pub struct EnemyBrain<B: EnemyBehavior> {
    config: EnemyConfig,
    pool: Vec<EnemyState>,
    state: EnemyState,
    last_state_change: f32,
    next_state_delay: f32,
    facing_right: bool,
    start_point: Vec2,
    health: Health,
    last_damage_time: Option<f32>,
    transitions: u32,
    finalized: bool,
    behavior: B,
    picker: Box<dyn StatePicker>,
}

impl<B: EnemyBehavior> EnemyBrain<B> {
    /// Build a brain at full health, idle and facing right.
    pub fn new(
        config: EnemyConfig,
        behavior: B,
        picker: impl StatePicker + 'static,
        start_point: Vec2,
    ) -> Result<Self, EnemyError> {
        config.validate()?;

        let mut pool = config.available_states.clone();
        for extra in behavior.extra_available_states() {
            if !pool.contains(extra) {
                pool.push(*extra);
            }
        }

        Ok(Self {
            health: Health::new(config.max_hp),
            config,
            pool,
            state: EnemyState::Idle,
            last_state_change: 0.0,
            next_state_delay: 0.0,
            facing_right: true,
            start_point,
            last_damage_time: None,
            transitions: 0,
            finalized: false,
            behavior,
            picker: Box::new(picker),
        })
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Death
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn start_point(&self) -> Vec2 {
        self.start_point
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn last_state_change(&self) -> f32 {
        self.last_state_change
    }

    pub fn next_state_delay(&self) -> f32 {
        self.next_state_delay
    }

    /// Number of committed transitions. Changes exactly when a new state is
    /// entered, even if it is the same state as before.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Run the full transition protocol into `target`.
    pub fn change_state(&mut self, target: EnemyState, ports: &mut dyn EnemyPorts) {
        // Death is terminal
        if self.is_dead() {
            return;
        }

        // Leave the old state before anything about the new one is visible
        let previous = self.state;
        self.behavior.on_state_exit(previous, ports);
        self.reset_flags(ports);

        // Idle is the neutral pose and has no flag of its own
        if target != EnemyState::Idle {
            ports.set_flag(target, true);
        }

        self.state = target;
        self.last_state_change = ports.now();
        self.transitions = self.transitions.wrapping_add(1);
        debug!("Enemy '{}' {} -> {}", self.config.name, previous, target);

        match target {
            // Stand still
            EnemyState::Idle => ports.set_velocity(Vec2::ZERO),
            // Freeze the body and drop out of collisions
            EnemyState::Death => {
                ports.set_velocity(Vec2::ZERO);
                ports.disable_body();
            }
            _ => {}
        }

        self.behavior.on_state_enter(target, ports);
    }

    /// Exit actions for the current state, driven by the clip dispatcher when
    /// a state's clip ends. The state itself is left unchanged.
    ///
    /// In `Death` this is death finalisation: periodic work stops and removal
    /// is signalled, exactly once.
    pub fn end_state(&mut self, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            if !self.finalized {
                self.finalized = true;
                self.behavior.on_removed();
                ports.destroyed();
            }
            return;
        }

        self.behavior.on_state_exit(self.state, ports);
        self.reset_flags(ports);
    }

    /// Clear per-state animation flags back to the neutral baseline.
    fn reset_flags(&mut self, ports: &mut dyn EnemyPorts) {
        for state in [
            EnemyState::Move,
            EnemyState::Strike,
            EnemyState::PowerStrike,
            EnemyState::Death,
        ] {
            ports.set_flag(state, false);
        }
        self.behavior.reset_flags(ports);
    }

    /// Draw a new state from the pool and a new dwell time, then transition.
    ///
    /// Drawing `Idle` while already `Idle` is rejected and re-drawn. A pool
    /// that only holds `Idle` therefore never settles while idle.
    pub fn roll_random_state(&mut self, ports: &mut dyn EnemyPorts) {
        let candidate = loop {
            let index = self.picker.pick_index(self.pool.len());
            let candidate = self.pool[index];
            if self.state == EnemyState::Idle && candidate == EnemyState::Idle {
                continue;
            }
            break candidate;
        };

        self.next_state_delay = self
            .picker
            .pick_delay(self.config.min_state_time, self.config.max_state_time);
        self.change_state(candidate, ports);
    }

    /// Per-frame logic: re-roll once the dwell time has run out.
    pub fn tick(&mut self, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            return;
        }

        if self.behavior.on_tick() == TickControl::Suppress {
            return;
        }

        if ports.now() - self.last_state_change > self.next_state_delay {
            self.roll_random_state(ports);
        }
    }

    /// Fixed-step movement: turn at ledges and patrol bounds, walk in `Move`.
    pub fn physics_step(&mut self, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            return;
        }

        // Ledge ahead or patrol range used up: turn back
        if !ports.ground_ahead() || self.past_patrol_bound(ports.position()) {
            self.flip(ports);
        }

        // Walk forward, letting gravity keep the vertical speed
        if self.state == EnemyState::Move {
            self.move_forward(ports);
        }
    }

    fn past_patrol_bound(&self, position: Vec2) -> bool {
        if self.config.range <= 0.0 || self.state != EnemyState::Move {
            return false;
        }
        (position.x - self.start_point.x) * self.facing_sign() > self.config.range
    }

    fn move_forward(&mut self, ports: &mut dyn EnemyPorts) {
        let vertical = ports.velocity().y;
        ports.set_velocity(Vec2::new(self.config.speed * self.facing_sign(), vertical));
    }

    pub fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    /// Toggle facing.
    pub fn flip(&mut self, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            return;
        }
        self.facing_right = !self.facing_right;
        ports.turn_around(self.facing_right);
    }

    /// Turn toward `target_x` only if it lies strictly behind us.
    pub fn face_towards(&mut self, target_x: f32, ports: &mut dyn EnemyPorts) {
        let dx = target_x - ports.position().x;
        if (dx > 0.0 && !self.facing_right) || (dx < 0.0 && self.facing_right) {
            self.flip(ports);
        }
    }

    /// Incoming damage. Lethal hits route through the full `Death` transition.
    pub fn take_damage(
        &mut self,
        amount: u32,
        kind: DamageType,
        source: Option<Entity>,
        ports: &mut dyn EnemyPorts,
    ) {
        if self.is_dead() {
            return;
        }

        match self.health.take_damage(amount) {
            DamageOutcome::Wounded => {
                // Cosmetic overlay only; the committed state is untouched.
                ports.set_flag(EnemyState::Hurt, true);
                debug!(
                    "Enemy '{}' took {} {:?} damage from {:?}, hp = {}",
                    self.config.name,
                    amount,
                    kind,
                    source,
                    self.health.current()
                );
                ports.health_changed(self.health.current(), self.health.maximum());
            }
            DamageOutcome::Depleted => {
                debug!("Enemy '{}' killed by {:?}", self.config.name, source);
                self.change_state(EnemyState::Death, ports);
            }
            DamageOutcome::Ignored => {}
        }
    }

    /// Contact with another body. `player` is set when that body can take
    /// damage from us.
    pub fn on_collision(&mut self, player: Option<Entity>, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            return;
        }

        // Still cooling down from the last hit
        let now = ports.now();
        if let Some(last) = self.last_damage_time {
            if now - last < self.config.collision_time_delay {
                return;
            }
        }

        if let Some(target) = player {
            ports.deliver_damage(
                target,
                self.config.collision_damage,
                self.config.collision_damage_type,
            );
            self.last_damage_time = Some(now);
        }
    }

    /// Fire the current state's one-shot action.
    pub fn state_action(&mut self, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            return;
        }
        self.behavior.on_state_action(self.state, self.facing_right, ports);
    }

    pub(crate) fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }
}
