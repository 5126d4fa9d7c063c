//! Enemy behaviour states.

use serde::Deserialize;

/// Every state an enemy can be in.
///
/// `Death` is terminal. `Hurt` is only ever raised as an animation flag on top
/// of the current state, never committed as the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum EnemyState {
    #[default]
    Idle,
    Move,
    Strike,
    PowerStrike,
    Shoot,
    Death,
    Hurt,
}

impl EnemyState {
    pub const COUNT: usize = 7;

    pub const ALL: [EnemyState; Self::COUNT] = [
        EnemyState::Idle,
        EnemyState::Move,
        EnemyState::Strike,
        EnemyState::PowerStrike,
        EnemyState::Shoot,
        EnemyState::Death,
        EnemyState::Hurt,
    ];

    /// Animation parameter name for this state.
    pub fn name(self) -> &'static str {
        match self {
            EnemyState::Idle => "Idle",
            EnemyState::Move => "Move",
            EnemyState::Strike => "Strike",
            EnemyState::PowerStrike => "PowerStrike",
            EnemyState::Shoot => "Shoot",
            EnemyState::Death => "Death",
            EnemyState::Hurt => "Hurt",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for EnemyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
