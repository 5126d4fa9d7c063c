//! Combat systems - applying enemy damage to the player.

use bevy::prelude::*;

use super::components::*;
use crate::core::{GameState, HealthChanged};
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(
        Update,
        (apply_player_damage, check_player_death)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}

/// Apply damage events that target the player.
///
/// Damage aimed at a player that is already dead is rejected.
pub fn apply_player_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut player_query: Query<(&mut Health, Has<Dead>), With<Player>>,
) {
    for event in damage_events.read() {
        let Ok((mut health, dead)) = player_query.get_mut(event.target) else {
            continue;
        };

        if dead {
            debug!("Rejected {} {:?} damage: player already dead", event.amount, event.kind);
            continue;
        }

        let outcome = health.take_damage(event.amount);
        debug!(
            "Player took {} {:?} damage, {} / {} left",
            event.amount,
            event.kind,
            health.current(),
            health.maximum()
        );

        commands.send_event(HealthChanged {
            entity: event.target,
            current: health.current(),
            maximum: health.maximum(),
        });

        if outcome == DamageOutcome::Depleted {
            commands.entity(event.target).insert(Dead);
        }
    }
}

/// Move to GameOver once the player is marked dead.
fn check_player_death(
    player_query: Query<(), (With<Player>, Added<Dead>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !player_query.is_empty() {
        next_state.set(GameState::GameOver);
    }
}
