//! Emergency office cleanup: click every piece of trash before time runs out.
//!
//! Positions are in office pixels (origin top-left, y down).
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::{company::stats::StatEffects, core::config::MinigameRules};

const MARGIN_X: f32 = 100.0;
const MARGIN_TOP: f32 = 150.0;
const MARGIN_BOTTOM: f32 = 100.0;
pub const TRASH_HIT_RADIUS: f32 = 20.0;

const WIN_MORALE: i32 = 10;
const WIN_MOOD: i32 = 20;
const LOSE_MORALE: i32 = -5;
const LOSE_MOOD: i32 = -10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupResult {
    Won,
    Lost,
}

impl CleanupResult {
    pub fn stat_effects(self) -> StatEffects {
        match self {
            Self::Won => StatEffects::morale(WIN_MORALE),
            Self::Lost => StatEffects::morale(LOSE_MORALE),
        }
    }

    pub fn mood_delta(self) -> i32 {
        match self {
            Self::Won => WIN_MOOD,
            Self::Lost => LOSE_MOOD,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Won => "Cleanup Complete! +Morale +Liam Mood",
            Self::Lost => "Too Slow! -Morale -Liam Mood",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrashItem {
    pub id: u32,
    pub position: Vec2,
    pub cleared: bool,
}

#[derive(Resource, Debug)]
pub struct CleanupRound {
    items: Vec<TrashItem>,
    timer: Timer,
    result: Option<CleanupResult>,
}

impl CleanupRound {
    /// Scatters trash across the open floor of an office of `room` size.
    pub fn new(room: Vec2, rules: &MinigameRules, rng: &mut impl Rng) -> Self {
        let max_x = (room.x - MARGIN_X).max(MARGIN_X);
        let max_y = (room.y - MARGIN_BOTTOM).max(MARGIN_TOP);
        let items = (0..rules.trash_count)
            .map(|id| TrashItem {
                id,
                position: Vec2::new(
                    rng.gen_range(MARGIN_X..=max_x),
                    rng.gen_range(MARGIN_TOP..=max_y),
                ),
                cleared: false,
            })
            .collect();
        Self {
            items,
            timer: Timer::from_seconds(rules.cleanup_seconds, TimerMode::Once),
            result: None,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &TrashItem> {
        self.items.iter()
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.cleared).count()
    }

    pub fn seconds_left(&self) -> f32 {
        self.timer.remaining_secs()
    }

    pub fn result(&self) -> Option<CleanupResult> {
        self.result
    }

    /// Advances the countdown. Returns `Lost` the moment time runs out.
    pub fn tick(&mut self, delta: Duration) -> Option<CleanupResult> {
        if self.result.is_some() {
            return None;
        }
        self.timer.tick(delta);
        if self.timer.is_finished() {
            self.result = Some(CleanupResult::Lost);
            return self.result;
        }
        None
    }

    /// Clears the trash under `point`. The id of the cleared item and, when it
    /// was the last one, the winning result.
    pub fn collect_at(&mut self, point: Vec2) -> Option<(u32, Option<CleanupResult>)> {
        if self.result.is_some() {
            return None;
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| !item.cleared && item.position.distance(point) <= TRASH_HIT_RADIUS)?;
        item.cleared = true;
        let id = item.id;
        if self.remaining() == 0 {
            self.result = Some(CleanupResult::Won);
        }
        Some((id, self.result))
    }
}
