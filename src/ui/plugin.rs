//! UI plugin - HUD, enemy health overlays, and the game over screen.

use bevy::prelude::*;

use super::health_bar::update_health_overlays;
use super::hud;
use crate::core::GameState;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.add_systems(
            Update,
            update_health_overlays.run_if(in_state(GameState::InGame)),
        )
        .add_systems(OnEnter(GameState::GameOver), setup_game_over);
    }
}

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

/// Set up the game over screen.
fn setup_game_over(mut commands: Commands) {
    // Dark overlay
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.9)),
            GameOverUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU DIED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
            ));
        });
}
