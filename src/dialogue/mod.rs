//! Conversations with the team and founder visits.
pub mod conversation;
pub mod errors;
pub mod events;
pub mod founders;
pub mod plugin;
pub mod systems;
pub mod typewriter;

pub use plugin::DialoguePlugin;
