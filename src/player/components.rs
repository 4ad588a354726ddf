//! Components and resources for the player avatar.
use bevy::prelude::*;

/// Marker for the player avatar.
#[derive(Component, Debug)]
pub struct Player;

/// Name tag floating above the player.
#[derive(Component, Debug)]
pub struct PlayerNameTag;

/// Tracks which NPC the player can currently talk to.
#[derive(Resource, Default, Debug)]
pub struct PlayerInteractionState {
    pub nearby_npc: Option<NearbyNpcInfo>,
}

/// The NPC whose interaction zone the player is standing in.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyNpcInfo {
    pub name: String,
    /// Distance from player to NPC in pixels.
    pub distance: f32,
}
