//! World-space health bars floating above enemies.
//!
//! The overlay is a sibling of the enemy's sprite, not a child of it, so
//! turning the sprite around never mirrors the bar.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::core::HealthChanged;

const BAR_WIDTH: f32 = 0.8;
const BAR_HEIGHT: f32 = 0.08;

/// Root of an enemy's health overlay.
#[derive(Component)]
pub struct HealthOverlay;

/// The shrinking part of a health overlay.
#[derive(Component)]
pub struct HealthBarFill {
    pub owner: Entity,
    pub maximum: u32,
}

/// Spawn a full health bar `height` above the parent's origin.
pub fn spawn_health_overlay(parent: &mut ChildBuilder, maximum: u32, height: f32) {
    let owner = parent.parent_entity();
    parent
        .spawn((
            HealthOverlay,
            Sprite {
                color: Color::srgb(0.1, 0.1, 0.1),
                custom_size: Some(Vec2::new(BAR_WIDTH, BAR_HEIGHT)),
                ..default()
            },
            Transform::from_xyz(0.0, height, 0.1),
        ))
        .with_children(|bar| {
            bar.spawn((
                HealthBarFill { owner, maximum },
                Sprite {
                    color: Color::srgb(0.8, 0.2, 0.2),
                    custom_size: Some(Vec2::new(BAR_WIDTH, BAR_HEIGHT)),
                    anchor: Anchor::CenterLeft,
                    ..default()
                },
                Transform::from_xyz(-BAR_WIDTH / 2.0, 0.0, 0.1),
            ));
        });
}

/// Shrink overlay fills to match their owner's reported health.
pub fn update_health_overlays(
    mut health_events: EventReader<HealthChanged>,
    mut fills: Query<(&mut HealthBarFill, &mut Transform)>,
) {
    for event in health_events.read() {
        for (mut fill, mut transform) in fills.iter_mut() {
            if fill.owner != event.entity {
                continue;
            }
            fill.maximum = event.maximum;
            transform.scale.x = fill_fraction(event.current, event.maximum);
        }
    }
}

/// Share of the bar that stays lit, in `0.0..=1.0`.
pub(crate) fn fill_fraction(current: u32, maximum: u32) -> f32 {
    if maximum == 0 {
        return 0.0;
    }
    (current as f32 / maximum as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_fraction_is_clamped() {
        assert_eq!(fill_fraction(5, 10), 0.5);
        assert_eq!(fill_fraction(12, 10), 1.0);
        assert_eq!(fill_fraction(0, 0), 0.0);
    }

    #[test]
    fn only_the_owner_bar_shrinks() {
        let mut app = App::new();
        app.add_event::<HealthChanged>()
            .add_systems(Update, update_health_overlays);

        let hit = app.world_mut().spawn_empty().id();
        let other = app.world_mut().spawn_empty().id();
        let hit_fill = app
            .world_mut()
            .spawn((HealthBarFill { owner: hit, maximum: 10 }, Transform::default()))
            .id();
        let other_fill = app
            .world_mut()
            .spawn((HealthBarFill { owner: other, maximum: 10 }, Transform::default()))
            .id();

        app.world_mut().send_event(HealthChanged {
            entity: hit,
            current: 4,
            maximum: 10,
        });
        app.update();

        let scale = |entity| app.world().get::<Transform>(entity).map(|t| t.scale.x);
        assert_eq!(scale(hit_fill), Some(0.4));
        assert_eq!(scale(other_fill), Some(1.0));
    }
}
