//! Components spawned for the duration of a minigame.
use bevy::prelude::*;

/// Despawned when the minigame phase ends.
#[derive(Component, Default)]
pub struct MinigameEntity;

#[derive(Component, Debug, Clone, Copy)]
pub struct BugSprite {
    pub id: u32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct TrashSprite {
    pub id: u32,
}

/// Countdown line shown during the cleanup.
#[derive(Component, Default)]
pub struct CleanupCountdown;
