//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use super::ai;
use super::animation;
use super::archer::Archer;
use super::behavior::{EnemyBehavior, Grunt};
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::projectile;
use crate::core::GameState;

/// Enemy plugin - handles enemy definitions, AI, clips and projectiles.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            // Registered by the physics plugin too; repeated registration is a no-op
            .add_event::<CollisionEvent>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(
                Update,
                ai::archer_scan
                    .before(ai::enemy_tick::<Archer>)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                FixedUpdate,
                ai::sense_ground.run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (
                    animation::sync_enemy_visuals,
                    projectile::expire_projectiles,
                    projectile::projectile_hits,
                )
                    .run_if(in_state(GameState::InGame)),
            );

        add_enemy_kind::<Grunt>(app);
        add_enemy_kind::<Archer>(app);
    }
}

/// Register the per-behaviour systems for brains of type `B`.
fn add_enemy_kind<B: EnemyBehavior>(app: &mut App) {
    app.add_systems(
        Update,
        (
            ai::audit_enemy_ports::<B>,
            ai::enemy_tick::<B>,
            ai::enemy_collisions::<B>,
            ai::apply_enemy_damage::<B>,
            animation::dispatch_state_clips::<B>,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        ai::enemy_physics_step::<B>
            .after(ai::sense_ground)
            .run_if(in_state(GameState::InGame)),
    );
}
