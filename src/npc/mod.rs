//! NPC module: roster content, office spawning and mood bars.
pub mod components;
pub mod plugin;
pub mod roster;
pub mod systems;

pub use plugin::NpcPlugin;
