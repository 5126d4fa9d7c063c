//! World plugin - arena loading and setup.

use bevy::prelude::*;

use crate::core::GameState;
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::player::{spawn_player, Player};

use super::data::{load_arena_layout, ArenaLayout};
use super::spawning::{spawn_platform, ArenaGeometry};

/// World plugin - handles arena loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_arena_layout, finish_loading).chain())
            .add_systems(OnEnter(GameState::InGame), setup_arena)
            .add_systems(OnExit(GameState::InGame), cleanup_arena);
    }
}

/// Data is loaded synchronously, so the game can start right away.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Build the arena from its layout.
pub fn setup_arena(mut commands: Commands, layout: Res<ArenaLayout>, registry: Res<EnemyRegistry>) {
    info!("Building arena: {}", layout.name);

    for platform in &layout.platforms {
        spawn_platform(&mut commands, platform);
    }

    for (index, spawn) in layout.enemies.iter().enumerate() {
        let position = Vec2::new(spawn.position.0, spawn.position.1);
        match spawn_enemy(&mut commands, &registry, &spawn.enemy_type, position, index as u64) {
            Ok(entity) => {
                commands.entity(entity).insert(ArenaGeometry);
            }
            Err(e) => warn!("Skipped enemy spawn {}: {}", index, e),
        }
    }

    let player = spawn_player(
        &mut commands,
        Vec2::new(layout.player_spawn.0, layout.player_spawn.1),
    );
    commands.entity(player).insert(ArenaGeometry);
}

/// Clean up arena entities when leaving InGame state.
fn cleanup_arena(
    mut commands: Commands,
    arena_query: Query<Entity, With<ArenaGeometry>>,
    player_query: Query<Entity, (With<Player>, Without<ArenaGeometry>)>,
) {
    for entity in arena_query.iter().chain(player_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}
