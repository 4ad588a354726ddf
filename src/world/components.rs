//! Components used by the world module.
use bevy::{math::Rect, prelude::*};

/// Marker for the single 2D camera.
#[derive(Component, Default)]
pub struct MainCamera;

/// Anything spawned for the office scene; despawned when the office closes.
#[derive(Component, Default)]
pub struct OfficeEntity;

/// Axis-aligned obstacle in world space that the player cannot enter.
#[derive(Component, Debug, Clone, Copy)]
pub struct Solid {
    pub bounds: Rect,
}
