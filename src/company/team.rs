//! Per-NPC mood tracking.
use std::{collections::HashMap, ops::RangeInclusive};

use bevy::prelude::*;
use rand::Rng;

pub const MOOD_MIN: i32 = 0;
pub const MOOD_MAX: i32 = 100;
/// Random mood change applied after every dialogue choice.
pub const CHOICE_MOOD_SWING: RangeInclusive<i32> = -40..=10;
/// Mood every NPC regains when a new week starts.
pub const WEEKLY_MOOD_RECOVERY: i32 = 10;

/// Mood of every team member keyed by NPC name.
#[derive(Resource, Debug, Clone, Default)]
pub struct TeamMoods {
    moods: HashMap<String, i32>,
}

impl TeamMoods {
    pub fn from_starting<'a>(entries: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let moods = entries
            .into_iter()
            .map(|(name, mood)| (name.to_string(), mood.clamp(MOOD_MIN, MOOD_MAX)))
            .collect();
        Self { moods }
    }

    pub fn get(&self, npc: &str) -> Option<i32> {
        self.moods.get(npc).copied()
    }

    /// Shifts one NPC's mood, clamped to `[0, 100]`. Returns the new value.
    pub fn adjust(&mut self, npc: &str, delta: i32) -> Option<i32> {
        let mood = self.moods.get_mut(npc)?;
        *mood = (*mood + delta).clamp(MOOD_MIN, MOOD_MAX);
        Some(*mood)
    }

    pub fn recover_all(&mut self, amount: i32) {
        for mood in self.moods.values_mut() {
            *mood = (*mood + amount).clamp(MOOD_MIN, MOOD_MAX);
        }
    }

    pub fn len(&self) -> usize {
        self.moods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}

pub fn roll_choice_mood_swing(rng: &mut impl Rng) -> i32 {
    rng.gen_range(CHOICE_MOOD_SWING)
}
