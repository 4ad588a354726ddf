//! Messages describing changes to the company and the run.
use bevy::prelude::Message;

use super::{
    ending::{EndReason, EndingReport},
    investment::{Allocation, Category},
    stats::{CompanyStats, StatEffects},
};

/// Investment panel input, from keys or buttons.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentAction {
    Invest(Category),
    Withdraw(Category),
    Confirm,
    Skip,
}

/// Stats changed; carries both sides so the HUD can show deltas.
#[derive(Message, Debug, Clone, Copy)]
pub struct StatsChanged {
    pub previous: CompanyStats,
    pub current: CompanyStats,
}

/// Menu asked to enter the office, either resuming or starting over.
#[derive(Message, Debug, Clone, Copy)]
pub struct SessionStartRequested {
    pub fresh: bool,
}

/// The weekly talk limit was hit and the calendar should move on.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct WeekAdvanceRequested;

#[derive(Message, Debug, Clone, Copy)]
pub struct WeekAdvanced {
    pub week: u32,
    pub weeks_total: u32,
    pub founder_visit: Option<usize>,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct GameEndRequested {
    pub reason: EndReason,
}

/// Emitted once the ending has been decided.
#[derive(Message, Debug, Clone, Copy)]
pub struct GameEnded {
    pub report: EndingReport,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct InvestmentSettled {
    pub week: u32,
    pub allocation: Allocation,
    pub spent: i64,
    pub effects: StatEffects,
}

/// A dialogue choice was applied.
#[derive(Message, Debug, Clone)]
pub struct ChoiceMade {
    pub week: u32,
    pub npc: String,
    pub question_index: usize,
    pub choice_index: usize,
    pub label: String,
    pub effects: StatEffects,
    pub mood_delta: i32,
}

/// Short-lived message in the top/bottom prompt area.
#[derive(Message, Debug, Clone)]
pub struct ToastRequested {
    pub message: String,
    pub seconds: f32,
}

impl ToastRequested {
    pub fn new(message: impl Into<String>, seconds: f32) -> Self {
        Self {
            message: message.into(),
            seconds,
        }
    }
}
