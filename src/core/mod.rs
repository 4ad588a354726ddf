//! Core module: configuration, state machines and the scaled clock.
pub mod config;
pub mod plugin;
pub mod state;

pub use plugin::CorePlugin;
