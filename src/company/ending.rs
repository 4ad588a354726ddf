//! Narrative ending chosen from the final stats.
use bevy::prelude::*;
use serde::Serialize;

use crate::company::stats::{format_number, CompanyStats};

const UNICORN_FUNDS: i64 = 1_000_000;
const UNICORN_RUNWAY_FUNDS: i64 = 200_000;
const UNICORN_SCORE: i32 = 85;
const GROWING_SCORE: i32 = 60;

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Bankrupt,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Bankrupt,
    Unicorn,
    FundedAndGrowing,
    Survived,
}

impl Ending {
    pub fn decide(snapshot: &StatsSnapshot, reason: EndReason) -> Self {
        let stats = &snapshot.stats;
        if stats.funds <= 0 || reason == EndReason::Bankrupt {
            Self::Bankrupt
        } else if stats.funds >= UNICORN_FUNDS
            || (stats.product >= UNICORN_SCORE
                && stats.hype >= UNICORN_SCORE
                && stats.funds >= UNICORN_RUNWAY_FUNDS)
        {
            Self::Unicorn
        } else if stats.product >= GROWING_SCORE && stats.hype >= GROWING_SCORE {
            Self::FundedAndGrowing
        } else {
            Self::Survived
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Bankrupt => "Game Over - Bankrupt",
            Self::Unicorn => "Billion-Dollar Trajectory",
            Self::FundedAndGrowing => "Funded & Growing",
            Self::Survived => "You Survived YC",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Bankrupt => "The runway ran out. Happens to the best of us.",
            Self::Unicorn => "Investors are fighting to get in. Don't forget us on your yacht.",
            Self::FundedAndGrowing => "Strong demo. Term sheets incoming.",
            Self::Survived => "Demo Day done. Onward!",
        }
    }

    pub fn accent(self) -> Color {
        match self {
            Self::Bankrupt => Color::srgb_u8(0xff, 0xb0, 0xb0),
            Self::Unicorn => Color::srgb_u8(0xb7, 0xff, 0xb7),
            Self::FundedAndGrowing => Color::srgb_u8(0xd6, 0xff, 0xd6),
            Self::Survived => Color::srgb_u8(0xcf, 0xe0, 0xff),
        }
    }

    /// Share of the full confetti burst this ending earns.
    pub fn confetti_intensity(self) -> f32 {
        match self {
            Self::Unicorn => 1.0,
            Self::FundedAndGrowing => 0.5,
            Self::Bankrupt | Self::Survived => 0.0,
        }
    }
}

/// Frozen copy of the run at the moment it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub week: u32,
    pub weeks_total: u32,
    pub stats: CompanyStats,
}

/// Ending plus the snapshot it was decided from, shown on the end screen.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndingReport {
    pub ending: Ending,
    pub reason: EndReason,
    pub snapshot: StatsSnapshot,
}

impl EndingReport {
    pub fn new(snapshot: StatsSnapshot, reason: EndReason) -> Self {
        Self {
            ending: Ending::decide(&snapshot, reason),
            reason,
            snapshot,
        }
    }

    pub fn summary_lines(&self) -> [String; 3] {
        let stats = &self.snapshot.stats;
        [
            format!("Week: {}/{}", self.snapshot.week, self.snapshot.weeks_total),
            format!("Funds: ${}", format_number(stats.funds)),
            format!(
                "Product: {}%   Morale: {}%   Hype: {}%",
                stats.product, stats.morale, stats.hype
            ),
        ]
    }
}
