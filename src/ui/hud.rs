//! Screen-space player health readout.
//!
//! Driven by the same `HealthChanged` events as the enemy overlays, so the
//! bar only moves when combat reports a new value.

use bevy::prelude::*;

use super::health_bar::fill_fraction;
use crate::core::{GameState, HealthChanged};
use crate::player::Player;

const BAR_WIDTH_PX: f32 = 200.0;
const BAR_HEIGHT_PX: f32 = 14.0;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// The lit part of the player's health bar.
#[derive(Component)]
pub struct PlayerHealthFill;

/// Register HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            update_player_health_fill.run_if(in_state(GameState::InGame)),
        );
}

/// Bottom-left frame with a full bar inside.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                bottom: Val::Px(20.0),
                width: Val::Px(BAR_WIDTH_PX),
                height: Val::Px(BAR_HEIGHT_PX),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor(Color::srgb(0.5, 0.45, 0.4)),
            BackgroundColor(Color::srgb(0.08, 0.08, 0.08)),
        ))
        .with_children(|frame| {
            frame.spawn((
                PlayerHealthFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.75, 0.15, 0.15)),
            ));
        });
}

/// Resize the fill from health reports that concern a player.
pub fn update_player_health_fill(
    mut health_events: EventReader<HealthChanged>,
    players: Query<(), With<Player>>,
    mut fills: Query<&mut Node, With<PlayerHealthFill>>,
) {
    // Only the latest report for the player matters this frame
    let Some(latest) = health_events
        .read()
        .filter(|event| players.contains(event.entity))
        .last()
    else {
        return;
    };

    let percent = fill_fraction(latest.current, latest.maximum) * 100.0;
    for mut node in fills.iter_mut() {
        node.width = Val::Percent(percent);
    }
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_width(app: &App, fill: Entity) -> Option<Val> {
        app.world().get::<Node>(fill).map(|node| node.width)
    }

    #[test]
    fn player_reports_move_the_bar_and_enemy_reports_do_not() {
        let mut app = App::new();
        app.add_event::<HealthChanged>()
            .add_systems(Update, update_player_health_fill);

        let player = app.world_mut().spawn(Player).id();
        let enemy = app.world_mut().spawn_empty().id();
        let fill = app
            .world_mut()
            .spawn((PlayerHealthFill, Node::default()))
            .id();

        app.world_mut().send_event(HealthChanged {
            entity: enemy,
            current: 1,
            maximum: 10,
        });
        app.update();
        assert_eq!(fill_width(&app, fill), Some(Val::Auto));

        app.world_mut().send_event(HealthChanged {
            entity: player,
            current: 80,
            maximum: 100,
        });
        app.world_mut().send_event(HealthChanged {
            entity: player,
            current: 25,
            maximum: 100,
        });
        app.update();
        assert_eq!(fill_width(&app, fill), Some(Val::Percent(25.0)));
    }
}
