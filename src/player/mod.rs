//! Player avatar: movement, collisions and starting conversations.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
