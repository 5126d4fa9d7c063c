//! Ranged enemy: scans for the player and shoots arrows while in range.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

use super::behavior::{EnemyBehavior, TickControl};
use super::brain::EnemyBrain;
use super::ports::{EnemyPorts, ProjectileShot};
use super::state::EnemyState;
use crate::core::DamageType;

/// Seconds between two aggro scans.
pub const DEFAULT_SCAN_INTERVAL: f32 = 1.0;
/// Seconds an arrow lives if it hits nothing.
pub const DEFAULT_PROJECTILE_LIFETIME: f32 = 5.0;

/// Shared cancellation flag for periodic work owned by an entity.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Repeating scan schedule. Fires on the first poll, then once per interval
/// until its token is cancelled.
#[derive(Debug, Clone)]
pub struct AggroScan {
    interval: f32,
    next_at: Option<f32>,
    token: CancellationToken,
}

impl AggroScan {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            next_at: None,
            token: CancellationToken::default(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether a scan cycle is due at `now`. Consumes the cycle if so.
    pub fn poll(&mut self, now: f32) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        match self.next_at {
            Some(at) if now < at => false,
            _ => {
                self.next_at = Some(now + self.interval);
                true
            }
        }
    }
}

/// Archer tuning and live aggro state.
#[derive(Debug, Clone)]
pub struct Archer {
    pub anger_range: f32,
    pub arrow_speed: f32,
    /// Launch point relative to the body when facing right.
    pub shoot_point: Vec2,
    pub projectile_damage: u32,
    pub projectile_kind: DamageType,
    pub projectile_lifetime: f32,
    scan: AggroScan,
    angry: bool,
    attacking: bool,
}

impl Archer {
    pub fn new(anger_range: f32, arrow_speed: f32, shoot_point: Vec2) -> Self {
        Self {
            anger_range,
            arrow_speed,
            shoot_point,
            projectile_damage: 1,
            projectile_kind: DamageType::Piercing,
            projectile_lifetime: DEFAULT_PROJECTILE_LIFETIME,
            scan: AggroScan::new(DEFAULT_SCAN_INTERVAL),
            angry: false,
            attacking: false,
        }
    }

    pub fn with_projectile(mut self, damage: u32, kind: DamageType, lifetime: f32) -> Self {
        self.projectile_damage = damage;
        self.projectile_kind = kind;
        self.projectile_lifetime = lifetime;
        self
    }

    pub fn with_scan_interval(mut self, interval: f32) -> Self {
        self.scan = AggroScan::new(interval);
        self
    }

    pub fn is_angry(&self) -> bool {
        self.angry
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn scan_token(&self) -> CancellationToken {
        self.scan.token()
    }

    fn shoot(&self, facing_right: bool, ports: &mut dyn EnemyPorts) {
        let sign = if facing_right { 1.0 } else { -1.0 };
        let origin =
            ports.position() + Vec2::new(self.shoot_point.x * sign, self.shoot_point.y);

        ports.spawn_projectile(ProjectileShot {
            origin,
            velocity: Vec2::new(self.arrow_speed * sign, 0.0),
            mirrored: !facing_right,
            lifetime: self.projectile_lifetime,
            damage: self.projectile_damage,
            kind: self.projectile_kind,
        });
    }
}

impl EnemyBehavior for Archer {
    fn on_tick(&mut self) -> TickControl {
        if self.angry {
            TickControl::Suppress
        } else {
            TickControl::Continue
        }
    }

    fn on_state_enter(&mut self, state: EnemyState, ports: &mut dyn EnemyPorts) {
        if state == EnemyState::Shoot {
            self.attacking = true;
            ports.set_velocity(Vec2::ZERO);
        }
    }

    fn on_state_exit(&mut self, state: EnemyState, _ports: &mut dyn EnemyPorts) {
        if state == EnemyState::Shoot {
            self.attacking = false;
        }
    }

    fn reset_flags(&mut self, ports: &mut dyn EnemyPorts) {
        ports.set_flag(EnemyState::Shoot, false);
        ports.set_flag(EnemyState::Hurt, false);
    }

    fn on_state_action(
        &mut self,
        state: EnemyState,
        facing_right: bool,
        ports: &mut dyn EnemyPorts,
    ) {
        if state == EnemyState::Shoot {
            self.shoot(facing_right, ports);
        }
    }

    fn on_removed(&mut self) {
        self.scan.token.cancel();
    }
}

impl EnemyBrain<Archer> {
    /// Periodic aggro scan. Runs a proximity check when the scan is due.
    pub fn scan_for_player(&mut self, player: Option<Vec2>, ports: &mut dyn EnemyPorts) {
        if self.is_dead() {
            return;
        }
        if self.behavior_mut().scan.poll(ports.now()) {
            self.check_player_in_range(player, ports);
        }
    }

    /// One scan cycle: force `Shoot` while the player is within anger range.
    pub fn check_player_in_range(&mut self, player: Option<Vec2>, ports: &mut dyn EnemyPorts) {
        let Some(player) = player else {
            return;
        };
        // Let the current shot play out
        if self.behavior().is_attacking() {
            return;
        }

        // In range: take over from the random tick and shoot
        if ports.position().distance(player) < self.behavior().anger_range {
            self.behavior_mut().angry = true;
            self.face_towards(player.x, ports);
            self.change_state(EnemyState::Shoot, ports);
        } else {
            // Out of range: hand control back to the random tick
            self.behavior_mut().angry = false;
        }
    }
}
