//! Enemy animation timing and visuals.
//!
//! Playback itself is external; this module only tracks how long the current
//! state's clip has been running so it can fire the state's action at the
//! release frame and run the state's exit actions when the clip ends.

use std::collections::HashMap;

use bevy::prelude::*;

use super::behavior::EnemyBehavior;
use super::components::{Enemy, EnemyVisual, Facing};
use super::io::{drive_enemy, EnemyPortsQuery};
use super::state::EnemyState;

/// Timing of one state's clip, in seconds from entering the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipTiming {
    /// When the state's one-shot action fires.
    pub action_at: Option<f32>,
    /// When the clip ends and the state's exit actions run.
    pub length: Option<f32>,
}

/// Clip timings for every state an enemy animates.
#[derive(Component, Debug, Clone, Default)]
pub struct StateClips(pub HashMap<EnemyState, ClipTiming>);

impl StateClips {
    /// Timings with a death clip of `death_linger` seconds. Death always has
    /// a length so finalisation is guaranteed to run.
    pub fn new(death_linger: f32) -> Self {
        let mut clips = HashMap::new();
        clips.insert(
            EnemyState::Death,
            ClipTiming {
                action_at: None,
                length: Some(death_linger.max(0.0)),
            },
        );
        Self(clips)
    }

    pub fn with(mut self, state: EnemyState, timing: ClipTiming) -> Self {
        if state != EnemyState::Death {
            self.0.insert(state, timing);
        }
        self
    }

    pub fn get(&self, state: EnemyState) -> Option<&ClipTiming> {
        self.0.get(&state)
    }
}

/// Cues raised by a clip during one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClipCues {
    pub action: bool,
    pub finished: bool,
}

/// Progress of the clip for the current state.
#[derive(Component, Debug, Default, Clone)]
pub struct StateClip {
    transitions: u32,
    elapsed: f32,
    action_fired: bool,
    finished: bool,
}

impl StateClip {
    /// Advance by `delta` seconds. A new transition count restarts the clip.
    pub fn advance(&mut self, transitions: u32, timing: Option<&ClipTiming>, delta: f32) -> ClipCues {
        if transitions != self.transitions {
            *self = Self {
                transitions,
                ..default()
            };
        }

        self.elapsed += delta;
        let mut cues = ClipCues::default();
        let Some(timing) = timing else {
            return cues;
        };

        if let Some(at) = timing.action_at {
            if !self.action_fired && self.elapsed >= at {
                self.action_fired = true;
                cues.action = true;
            }
        }

        if let Some(length) = timing.length {
            if !self.finished && self.elapsed >= length {
                self.finished = true;
                cues.finished = true;
            }
        }

        cues
    }
}

/// Fire state actions and clip-end exits for every enemy.
pub fn dispatch_state_clips<B: EnemyBehavior>(
    time: Res<Time<Virtual>>,
    mut commands: Commands,
    mut enemies: Query<EnemyPortsQuery<B>, With<Enemy>>,
    mut clips: Query<(&mut StateClip, &StateClips)>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for item in enemies.iter_mut() {
        let Ok((mut clip, timings)) = clips.get_mut(item.0) else {
            continue;
        };

        drive_enemy(&mut commands, now, item, |brain, ports| {
            let cues = clip.advance(brain.transitions(), timings.get(brain.state()), delta);
            if cues.action {
                brain.state_action(ports);
            }
            if cues.finished {
                brain.end_state(ports);
            }
        });
    }
}

/// Rotate each enemy's sprite child 180 degrees about the vertical axis when
/// it faces left. Other children, like the health overlay, keep their
/// orientation.
pub fn sync_enemy_visuals(
    enemies: Query<(&Facing, &Children), (With<Enemy>, Changed<Facing>)>,
    mut visuals: Query<&mut Transform, With<EnemyVisual>>,
) {
    for (facing, children) in enemies.iter() {
        for &child in children.iter() {
            if let Ok(mut transform) = visuals.get_mut(child) {
                transform.rotation = if facing.right {
                    Quat::IDENTITY
                } else {
                    Quat::from_rotation_y(std::f32::consts::PI)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOOT: ClipTiming = ClipTiming {
        action_at: Some(0.3),
        length: Some(0.8),
    };

    #[test]
    fn action_fires_once_at_release_time() {
        let mut clip = StateClip::default();
        assert_eq!(clip.advance(1, Some(&SHOOT), 0.2), ClipCues::default());
        assert!(clip.advance(1, Some(&SHOOT), 0.2).action);
        assert!(!clip.advance(1, Some(&SHOOT), 0.2).action);
    }

    #[test]
    fn clip_finishes_once() {
        let mut clip = StateClip::default();
        let mut finished = 0;
        for _ in 0..10 {
            if clip.advance(1, Some(&SHOOT), 0.25).finished {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
    }

    #[test]
    fn new_transition_restarts_clip() {
        let mut clip = StateClip::default();
        clip.advance(1, Some(&SHOOT), 1.0);

        let cues = clip.advance(2, Some(&SHOOT), 0.1);
        assert!(!cues.action);
        assert!(!cues.finished);

        assert!(clip.advance(2, Some(&SHOOT), 0.25).action);
    }

    #[test]
    fn states_without_timing_raise_nothing() {
        let mut clip = StateClip::default();
        assert_eq!(clip.advance(1, None, 10.0), ClipCues::default());
    }

    #[test]
    fn death_always_has_a_clip_length() {
        let clips = StateClips::new(1.5).with(
            EnemyState::Death,
            ClipTiming {
                action_at: None,
                length: None,
            },
        );
        assert_eq!(clips.get(EnemyState::Death).and_then(|t| t.length), Some(1.5));
    }
}
