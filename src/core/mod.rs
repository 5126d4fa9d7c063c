//! Core game module - states, events, and shared physics layers.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
pub mod physics;
mod plugin;
mod states;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
