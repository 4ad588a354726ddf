//! Top-level screen and in-office phase states.
use bevy::prelude::*;

/// Which full-screen view is active.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameScreen {
    #[default]
    Menu,
    Settings,
    Office,
    End,
}

/// Sequencing inside the office. `Inactive` whenever the office is not shown.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OfficePhase {
    #[default]
    Inactive,
    Investment,
    Notice,
    BugHunt,
    Cleanup,
    Roaming,
    Dialogue,
    WeekBanner,
    FounderVisit,
}

impl OfficePhase {
    /// Phases in which the player avatar may walk around.
    pub fn allows_movement(self) -> bool {
        matches!(self, Self::Roaming | Self::Cleanup)
    }
}
