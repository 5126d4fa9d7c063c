//! Enemy spawning from registry definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::animation::StateClip;
use super::behavior::Grunt;
use super::brain::EnemyBrain;
use super::components::{AnimationFlags, Enemy, EnemyType, EnemyVisual, Facing, GroundSensor};
use super::data::{EnemyDefinition, EnemyRegistry};
use super::error::EnemyError;
use crate::core::physics::enemy_groups;
use crate::ui::spawn_health_overlay;

/// Spawn one enemy of `enemy_type` at `position`.
///
/// `spawn_index` seeds the enemy's random source unless its definition pins
/// a seed, so two enemies of the same type never share a roll sequence.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    enemy_type: &str,
    position: Vec2,
    spawn_index: u64,
) -> Result<Entity, EnemyError> {
    let definition = registry
        .get(enemy_type)
        .ok_or_else(|| EnemyError::UnknownType(enemy_type.to_string()))?;

    definition.validate()?;

    let seed = definition.seed.unwrap_or(spawn_index);
    let picker = StdRng::seed_from_u64(seed);
    let config = definition.to_config();

    let body = enemy_body(definition, enemy_type, position);
    let mut entity = match &definition.archer {
        Some(archer) => {
            let brain = EnemyBrain::new(config, archer.to_behavior(), picker, position)?;
            commands.spawn((body, brain))
        }
        None => commands.spawn((body, EnemyBrain::new(config, Grunt, picker, position)?)),
    };

    let body_height = definition.collider.half_height + definition.collider.radius;
    let max_hp = definition.max_hp;
    entity.with_children(|parent| {
        parent.spawn((
            EnemyVisual,
            Sprite {
                color: if definition.archer.is_some() {
                    Color::srgb(0.35, 0.55, 0.3)
                } else {
                    Color::srgb(0.6, 0.3, 0.25)
                },
                custom_size: Some(Vec2::new(
                    definition.collider.radius * 2.0,
                    body_height * 2.0,
                )),
                ..default()
            },
            Transform::default(),
        ));
        spawn_health_overlay(parent, max_hp, body_height + 0.3);
    });

    let id = entity.id();
    info!(
        "Spawned {} ({}) at ({:.1}, {:.1}) with seed {}",
        definition.name, enemy_type, position.x, position.y, seed
    );
    Ok(id)
}

/// Components shared by every enemy body, excluding the brain.
fn enemy_body(definition: &EnemyDefinition, enemy_type: &str, position: Vec2) -> impl Bundle {
    let offset = Vec2::new(definition.ground_check.0, definition.ground_check.1);
    (
        (
            Enemy,
            EnemyType(enemy_type.to_string()),
            AnimationFlags::default(),
            Facing::default(),
            GroundSensor::new(offset),
            StateClip::default(),
            definition.state_clips(),
        ),
        (
            Transform::from_translation(position.extend(0.0)),
            Visibility::default(),
            RigidBody::Dynamic,
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED,
            Collider::capsule_y(definition.collider.half_height, definition.collider.radius),
            ActiveEvents::COLLISION_EVENTS,
            enemy_groups(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::archer::Archer;
    use crate::enemies::state::EnemyState;

    fn spawn(registry: &EnemyRegistry, enemy_type: &str, index: u64) -> (World, Result<Entity, EnemyError>) {
        let mut world = World::new();
        let result = {
            let mut commands = world.commands();
            spawn_enemy(&mut commands, registry, enemy_type, Vec2::new(3.0, 1.0), index)
        };
        world.flush();
        (world, result)
    }

    #[test]
    fn unknown_type_is_rejected() {
        let (_, result) = spawn(&EnemyRegistry::with_builtins(), "wyvern", 0);
        assert_eq!(result, Err(EnemyError::UnknownType("wyvern".to_string())));
    }

    #[test]
    fn archer_definition_spawns_archer_brain() {
        let (world, result) = spawn(&EnemyRegistry::with_builtins(), "archer", 1);
        let entity = result.unwrap();

        let brain = world.get::<EnemyBrain<Archer>>(entity).unwrap();
        assert_eq!(brain.state(), EnemyState::Idle);
        assert_eq!(brain.start_point(), Vec2::new(3.0, 1.0));
        assert!(world.get::<EnemyBrain<Grunt>>(entity).is_none());
        assert!(world.get::<Velocity>(entity).is_some());
        assert!(world.get::<GroundSensor>(entity).is_some());
        assert_eq!(world.get::<Children>(entity).map(|c| c.len()), Some(2));
    }

    #[test]
    fn plain_definition_spawns_grunt_brain() {
        let (world, result) = spawn(&EnemyRegistry::with_builtins(), "grunt", 2);
        let entity = result.unwrap();

        assert!(world.get::<EnemyBrain<Grunt>>(entity).is_some());
        assert_eq!(world.get::<EnemyType>(entity).map(|t| t.0.as_str()), Some("grunt"));
    }

    #[test]
    fn archer_that_cannot_finish_a_shot_is_not_spawned() {
        let mut registry = EnemyRegistry::with_builtins();
        if let Some(definition) = registry.definitions.get_mut("archer") {
            definition.clips.retain(|clip| clip.state != EnemyState::Shoot);
        }
        let (mut world, result) = spawn(&registry, "archer", 0);
        assert!(matches!(result, Err(EnemyError::IncompleteShootClip { .. })));
        assert_eq!(world.query::<&Enemy>().iter(&world).count(), 0);
    }

    #[test]
    fn invalid_definition_is_rejected() {
        let mut registry = EnemyRegistry::with_builtins();
        if let Some(definition) = registry.definitions.get_mut("grunt") {
            definition.max_hp = 0;
        }
        let (mut world, result) = spawn(&registry, "grunt", 0);
        assert!(matches!(result, Err(EnemyError::ZeroMaxHp { .. })));
        assert_eq!(world.query::<&Enemy>().iter(&world).count(), 0);
    }
}
