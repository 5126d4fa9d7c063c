//! Hollow Ridge - Entry Point
//!
//! Spawns the arena from `assets/data/arena.ron` and lets its enemies loose
//! on a stationary player.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// World units to pixels.
const PIXELS_PER_METER: f32 = 48.0;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hollow Ridge".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(hollow_ridge::HollowRidgePlugin)

        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / PIXELS_PER_METER,
            ..OrthographicProjection::default_2d()
        },
    ));
}
