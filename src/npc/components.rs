//! NPC-specific components.
use bevy::prelude::*;

/// Team member standing in the office, keyed by roster name.
#[derive(Component, Debug, Clone)]
pub struct Npc {
    pub name: String,
}

/// Area around an NPC in which the player can start a conversation.
#[derive(Component, Debug, Clone, Copy)]
pub struct InteractionZone {
    pub half_extents: Vec2,
}

impl InteractionZone {
    pub fn from_size(size: Vec2) -> Self {
        Self {
            half_extents: size / 2.0,
        }
    }

    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let offset = (point - center).abs();
        offset.x <= self.half_extents.x && offset.y <= self.half_extents.y
    }
}

/// Coloured fill of an NPC's mood bar.
#[derive(Component, Debug, Clone)]
pub struct MoodBarFill {
    pub npc: String,
}
