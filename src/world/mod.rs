//! World module housing the office floor plan, its scene and the camera.
pub mod components;
pub mod layout;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
