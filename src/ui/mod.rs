//! UI module - the player HUD and enemy health overlays.

mod health_bar;
mod hud;
mod plugin;

pub use health_bar::{spawn_health_overlay, HealthBarFill, HealthOverlay};
pub use hud::{HudRoot, PlayerHealthFill};
pub use plugin::UiPlugin;
