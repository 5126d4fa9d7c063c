//! ECS adapter that exposes an enemy entity's components as [`EnemyPorts`].

use bevy::ecs::query::QueryItem;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::behavior::EnemyBehavior;
use super::brain::EnemyBrain;
use super::components::{AnimationFlags, Facing, GroundSensor};
use super::ports::{EnemyPorts, ProjectileShot};
use super::projectile::spawn_projectile;
use super::state::EnemyState;
use crate::core::{DamageEvent, DamageType, EnemyDestroyed, HealthChanged};

/// Components every enemy brain drives.
pub type EnemyPortsQuery<B> = (
    Entity,
    &'static mut EnemyBrain<B>,
    &'static Transform,
    &'static mut Velocity,
    &'static mut AnimationFlags,
    &'static mut Facing,
    &'static GroundSensor,
);

/// One enemy's ports for the duration of a single system call.
///
/// Components are held as [`Mut`] so reads leave change detection alone and
/// only real writes mark them changed.
pub struct EnemyIo<'a, 'w, 's> {
    pub entity: Entity,
    pub now: f32,
    pub transform: &'a Transform,
    pub velocity: Mut<'a, Velocity>,
    pub flags: Mut<'a, AnimationFlags>,
    pub facing: Mut<'a, Facing>,
    pub grounded: bool,
    pub commands: &'a mut Commands<'w, 's>,
}

impl EnemyPorts for EnemyIo<'_, '_, '_> {
    fn now(&self) -> f32 {
        self.now
    }

    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.linvel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if self.velocity.linvel != velocity {
            self.velocity.linvel = velocity;
        }
    }

    fn ground_ahead(&self) -> bool {
        self.grounded
    }

    fn set_flag(&mut self, state: EnemyState, on: bool) {
        if self.flags.get(state) != on {
            self.flags.set(state, on);
        }
    }

    fn turn_around(&mut self, facing_right: bool) {
        if self.facing.right != facing_right {
            self.facing.right = facing_right;
        }
    }

    fn disable_body(&mut self) {
        self.velocity.linvel = Vec2::ZERO;
        self.velocity.angvel = 0.0;
        self.commands
            .entity(self.entity)
            .insert((RigidBody::Fixed, ColliderDisabled));
    }

    fn health_changed(&mut self, current: u32, maximum: u32) {
        self.commands.send_event(HealthChanged {
            entity: self.entity,
            current,
            maximum,
        });
    }

    fn deliver_damage(&mut self, target: Entity, amount: u32, kind: DamageType) {
        self.commands.send_event(DamageEvent {
            target,
            source: Some(self.entity),
            amount,
            kind,
        });
    }

    fn spawn_projectile(&mut self, shot: ProjectileShot) {
        spawn_projectile(self.commands, shot, Some(self.entity));
    }

    fn destroyed(&mut self) {
        info!("Enemy {} removed from the world", self.entity);
        self.commands.send_event(EnemyDestroyed {
            entity: self.entity,
        });
        self.commands.entity(self.entity).despawn_recursive();
    }
}

/// Run `f` against one queried enemy with its ports wired up.
pub fn drive_enemy<B: EnemyBehavior, R>(
    commands: &mut Commands,
    now: f32,
    item: QueryItem<'_, EnemyPortsQuery<B>>,
    f: impl FnOnce(&mut EnemyBrain<B>, &mut dyn EnemyPorts) -> R,
) -> R {
    let (entity, mut brain, transform, velocity, flags, facing, sensor) = item;
    let mut io = EnemyIo {
        entity,
        now,
        transform,
        velocity,
        flags,
        facing,
        grounded: sensor.grounded,
        commands,
    };
    f(&mut *brain, &mut io)
}
