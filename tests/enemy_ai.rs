//! Headless runs of the enemy plugin: real schedules and events, no physics
//! simulation and no rendering.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hollow_ridge::combat::{CombatPlugin, Dead, Health};
use hollow_ridge::core::{CorePlugin, DamageEvent, DamageType, EnemyDestroyed, GameState, HealthChanged};
use hollow_ridge::enemies::archer::Archer;
use hollow_ridge::enemies::projectile::Projectile;
use hollow_ridge::enemies::{
    spawn_enemy, AnimationFlags, Enemy, EnemyBrain, EnemyConfig, EnemyPlugin, EnemyRegistry,
    EnemyState, Facing, Grunt,
};
use hollow_ridge::player::spawn_player;

#[derive(Resource, Default)]
struct Observed {
    destroyed: Vec<Entity>,
    health: Vec<HealthChanged>,
    facing_changes: usize,
}

fn observe(
    mut observed: ResMut<Observed>,
    mut destroyed: EventReader<EnemyDestroyed>,
    mut health: EventReader<HealthChanged>,
    turned: Query<(), (With<Enemy>, Changed<Facing>)>,
) {
    observed.destroyed.extend(destroyed.read().map(|e| e.entity));
    observed.health.extend(health.read().copied());
    observed.facing_changes += turned.iter().count();
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins((CorePlugin, CombatPlugin, EnemyPlugin))
        .init_resource::<Observed>()
        .add_systems(Last, observe);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    // Startup loads the enemy definitions and the state moves to InGame.
    app.update();
    app
}

fn spawn(app: &mut App, enemy_type: &str, position: Vec2) -> Entity {
    let registry = app.world().resource::<EnemyRegistry>().clone();
    let entity = {
        let mut commands = app.world_mut().commands();
        spawn_enemy(&mut commands, &registry, enemy_type, position, 7).unwrap()
    };
    app.world_mut().flush();
    entity
}

fn place_player(app: &mut App, position: Vec2) -> Entity {
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, position)
    };
    app.world_mut().flush();
    player
}

fn run_for(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

#[test]
fn archer_shoots_player_in_range() {
    let mut app = test_app();
    let archer = spawn(&mut app, "archer", Vec2::ZERO);
    place_player(&mut app, Vec2::new(3.0, 0.0));

    run_for(&mut app, 2);
    let brain = app.world().get::<EnemyBrain<Archer>>(archer).unwrap();
    assert_eq!(brain.state(), EnemyState::Shoot);
    assert!(brain.behavior().is_angry());
    assert_eq!(app.world().get::<Velocity>(archer).unwrap().linvel, Vec2::ZERO);

    run_for(&mut app, 8);
    let mut projectiles = app.world_mut().query::<(&Projectile, &Velocity)>();
    let shots: Vec<_> = projectiles.iter(app.world()).collect();
    assert!(!shots.is_empty());
    for (projectile, velocity) in shots {
        assert_eq!(projectile.source, Some(archer));
        assert_eq!(projectile.kind, DamageType::Piercing);
        assert!(velocity.linvel.x > 0.0);
    }
}

#[test]
fn archer_ignores_distant_player() {
    let mut app = test_app();
    let archer = spawn(&mut app, "archer", Vec2::ZERO);
    place_player(&mut app, Vec2::new(-20.0, 0.0));

    run_for(&mut app, 15);
    let brain = app.world().get::<EnemyBrain<Archer>>(archer).unwrap();
    assert_ne!(brain.state(), EnemyState::Shoot);
    assert!(!brain.behavior().is_angry());

    let mut projectiles = app.world_mut().query::<&Projectile>();
    assert_eq!(projectiles.iter(app.world()).count(), 0);
}

#[test]
fn lethal_damage_freezes_then_removes_enemy() {
    let mut app = test_app();
    let archer = spawn(&mut app, "archer", Vec2::ZERO);
    run_for(&mut app, 1);
    let token = app
        .world()
        .get::<EnemyBrain<Archer>>(archer)
        .unwrap()
        .behavior()
        .scan_token();

    app.world_mut().send_event(DamageEvent {
        target: archer,
        source: None,
        amount: 15,
        kind: DamageType::Fire,
    });
    run_for(&mut app, 1);

    let world = app.world();
    assert_eq!(world.get::<EnemyBrain<Archer>>(archer).unwrap().state(), EnemyState::Death);
    assert!(matches!(world.get::<RigidBody>(archer), Some(RigidBody::Fixed)));
    assert!(world.get::<ColliderDisabled>(archer).is_some());
    assert!(world.resource::<Observed>().destroyed.is_empty());
    assert!(!token.is_cancelled());

    // Death lingers for one second before the enemy leaves the world.
    run_for(&mut app, 15);
    assert!(!app.world().entities().contains(archer));
    assert!(token.is_cancelled());
    let observed = app.world().resource::<Observed>();
    assert_eq!(observed.destroyed, vec![archer]);
    assert!(observed.health.iter().all(|h| h.entity != archer));
}

#[test]
fn non_lethal_damage_reports_health() {
    let mut app = test_app();
    let grunt = spawn(&mut app, "grunt", Vec2::ZERO);

    app.world_mut().send_event(DamageEvent {
        target: grunt,
        source: None,
        amount: 15,
        kind: DamageType::Casual,
    });
    run_for(&mut app, 1);

    let brain = app.world().get::<EnemyBrain<Grunt>>(grunt).unwrap();
    assert!(!brain.is_dead());
    assert_eq!(brain.health().current(), 5);
    assert!(app
        .world()
        .resource::<Observed>()
        .health
        .contains(&HealthChanged {
            entity: grunt,
            current: 5,
            maximum: 20,
        }));
}

#[test]
fn contact_hurts_player_once_per_cooldown() {
    let mut app = test_app();
    let grunt = spawn(&mut app, "grunt", Vec2::ZERO);
    let player = place_player(&mut app, Vec2::new(0.5, 0.0));

    for _ in 0..3 {
        app.world_mut().send_event(CollisionEvent::Started(
            grunt,
            player,
            CollisionEventFlags::empty(),
        ));
        run_for(&mut app, 1);
    }

    // Grunts deal 2 per contact with a one second cooldown.
    assert_eq!(app.world().get::<Health>(player).unwrap().current(), 98);
}

#[test]
fn player_death_ends_the_game() {
    let mut app = test_app();
    let player = place_player(&mut app, Vec2::ZERO);

    app.world_mut().send_event(DamageEvent {
        target: player,
        source: None,
        amount: 500,
        kind: DamageType::Poison,
    });
    run_for(&mut app, 2);

    assert!(app.world().get::<Dead>(player).is_some());
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::GameOver
    );
}

fn bare_brain() -> EnemyBrain<Grunt> {
    EnemyBrain::new(EnemyConfig::default(), Grunt, StdRng::seed_from_u64(1), Vec2::ZERO).unwrap()
}

#[test]
fn brain_without_ports_is_removed() {
    let mut app = test_app();
    let bare = app
        .world_mut()
        .spawn((Enemy, bare_brain(), Transform::default()))
        .id();
    // Everything but the ground sensor
    let partial = app
        .world_mut()
        .spawn((
            Enemy,
            bare_brain(),
            Transform::default(),
            Velocity::zero(),
            AnimationFlags::default(),
            Facing::default(),
        ))
        .id();

    run_for(&mut app, 1);
    assert!(!app.world().entities().contains(bare));
    assert!(!app.world().entities().contains(partial));
}

#[test]
fn fully_wired_enemy_survives_port_audit() {
    let mut app = test_app();
    let grunt = spawn(&mut app, "grunt", Vec2::ZERO);

    run_for(&mut app, 3);
    assert!(app.world().entities().contains(grunt));
    assert!(app.world().get::<EnemyBrain<Grunt>>(grunt).is_some());
}

#[test]
fn facing_only_changes_on_a_turn() {
    let mut app = test_app();
    spawn(&mut app, "grunt", Vec2::ZERO);

    // The first frame sees the freshly added component.
    run_for(&mut app, 1);
    app.world_mut().resource_mut::<Observed>().facing_changes = 0;

    // No physics runs, so the ground stays underfoot and the body never
    // leaves its patrol range: nothing should turn it around.
    run_for(&mut app, 20);
    assert_eq!(app.world().resource::<Observed>().facing_changes, 0);
}
