//! Pluggable behaviour policies layered on top of the shared state machine.

use super::ports::EnemyPorts;
use super::state::EnemyState;

/// What the autonomous tick should do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Run the timed random re-roll as usual.
    Continue,
    /// The policy owns state changes right now; skip the re-roll.
    Suppress,
}

/// Hooks a concrete enemy variant implements instead of subclassing the core.
///
/// Every hook has a no-op default, so the plain melee enemy is just
/// [`Grunt`].
pub trait EnemyBehavior: Send + Sync + 'static {
    fn on_tick(&mut self) -> TickControl {
        TickControl::Continue
    }

    /// Runs after the core's own entry effects for `state`.
    fn on_state_enter(&mut self, _state: EnemyState, _ports: &mut dyn EnemyPorts) {}

    /// Runs before the core resets animation flags on leaving `state`.
    fn on_state_exit(&mut self, _state: EnemyState, _ports: &mut dyn EnemyPorts) {}

    /// Extra animation flags to clear on top of the core baseline.
    fn reset_flags(&mut self, _ports: &mut dyn EnemyPorts) {}

    /// Per-state action fired once by the clip dispatcher.
    fn on_state_action(
        &mut self,
        _state: EnemyState,
        _facing_right: bool,
        _ports: &mut dyn EnemyPorts,
    ) {
    }

    /// States added to the configured random pool.
    fn extra_available_states(&self) -> &[EnemyState] {
        &[]
    }

    /// The owning entity is leaving the world. Stop any periodic work.
    fn on_removed(&mut self) {}
}

/// Plain melee enemy: patrols, strikes, bumps into the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grunt;

impl EnemyBehavior for Grunt {}
