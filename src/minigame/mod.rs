//! Short arcade interludes: the week-6 bug invasion and the intern's cleanup.
pub mod bug_hunt;
pub mod cleanup;
pub mod components;
pub mod plugin;
pub mod systems;

use bevy::prelude::*;
use serde::Serialize;

pub use plugin::MinigamePlugin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameKind {
    BugHunt,
    Cleanup,
}

/// Minigame announced by the notice panel and started when it is dismissed.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMinigame(pub MinigameKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MinigameOutcome {
    BugHunt { squashed: u32, breached: u32 },
    Cleanup { cleared: bool },
}

#[derive(Message, Debug, Clone, Copy)]
pub struct MinigameFinished {
    pub outcome: MinigameOutcome,
}
