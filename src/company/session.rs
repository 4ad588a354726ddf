//! Week bookkeeping: who was talked to, question progress and the save flag.
use std::collections::{BTreeSet, HashMap};

use bevy::prelude::*;

use crate::{
    company::investment::Allocation, core::config::SessionRules, dialogue::errors::DialogueError,
};

const FOUNDER_VISIT_INTERVAL: u32 = 3;
const FOUNDER_VISIT_LAST_WEEK: u32 = 12;

/// Outcome of moving the calendar forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekAdvance {
    Advanced {
        week: u32,
        founder_visit: Option<usize>,
    },
    Finished,
}

/// Per-run progress. Survives a trip to the menu, reset by a new game.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    week: u32,
    weeks_total: u32,
    weekly_npc_limit: usize,
    player_name: String,
    talked_this_week: BTreeSet<String>,
    question_progress: HashMap<String, usize>,
    has_save: bool,
    last_allocation: Option<Allocation>,
}

impl GameSession {
    pub fn new(rules: &SessionRules) -> Self {
        Self {
            week: 1,
            weeks_total: rules.weeks_total,
            weekly_npc_limit: rules.weekly_npc_limit,
            player_name: rules.default_player_name.clone(),
            talked_this_week: BTreeSet::new(),
            question_progress: HashMap::new(),
            has_save: false,
            last_allocation: None,
        }
    }

    /// Resets progress for a fresh run. The player name is kept.
    pub fn new_game(&mut self, rules: &SessionRules) {
        let player_name = std::mem::take(&mut self.player_name);
        *self = Self::new(rules);
        self.player_name = player_name;
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn weeks_total(&self) -> u32 {
        self.weeks_total
    }

    pub fn weekly_npc_limit(&self) -> usize {
        self.weekly_npc_limit
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    pub fn has_save(&self) -> bool {
        self.has_save
    }

    pub fn set_has_save(&mut self, has_save: bool) {
        self.has_save = has_save;
    }

    pub fn last_allocation(&self) -> Option<Allocation> {
        self.last_allocation
    }

    pub fn remember_allocation(&mut self, allocation: Allocation) {
        self.last_allocation = Some(allocation);
    }

    pub fn talked_count(&self) -> usize {
        self.talked_this_week.len()
    }

    pub fn has_talked(&self, npc: &str) -> bool {
        self.talked_this_week.contains(npc)
    }

    pub fn progress(&self, npc: &str) -> usize {
        self.question_progress.get(npc).copied().unwrap_or(0)
    }

    pub fn weekly_limit_reached(&self) -> bool {
        self.talked_count() >= self.weekly_npc_limit
    }

    /// Checks whether a conversation with `npc` may start right now.
    pub fn can_talk(&self, npc: &str, total_questions: usize) -> Result<(), DialogueError> {
        if self.weekly_limit_reached() {
            return Err(DialogueError::WeeklyLimitReached {
                limit: self.weekly_npc_limit,
            });
        }
        if self.has_talked(npc) {
            return Err(DialogueError::AlreadyTalked {
                npc: npc.to_string(),
            });
        }
        if self.progress(npc) >= total_questions {
            return Err(DialogueError::NoQuestionsLeft {
                npc: npc.to_string(),
            });
        }
        Ok(())
    }

    /// Moves `npc` to its next question and marks it as talked to this week.
    pub fn record_conversation(&mut self, npc: &str) {
        *self.question_progress.entry(npc.to_string()).or_insert(0) += 1;
        self.talked_this_week.insert(npc.to_string());
    }

    pub fn advance_week(&mut self) -> WeekAdvance {
        self.week += 1;
        if self.week > self.weeks_total {
            return WeekAdvance::Finished;
        }
        self.talked_this_week.clear();
        WeekAdvance::Advanced {
            week: self.week,
            founder_visit: founder_visit_for(self.week),
        }
    }

    pub fn is_final_week(&self) -> bool {
        self.week >= self.weeks_total
    }

    /// The last scheduled founder visit closes the run when it lands on the final week.
    pub fn founder_visit_ends_run(&self) -> bool {
        self.week == FOUNDER_VISIT_LAST_WEEK && self.is_final_week()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(&crate::core::config::GameConfig::default().session)
    }
}

/// Founder index visiting at the start of `week`, if any.
pub fn founder_visit_for(week: u32) -> Option<usize> {
    if week % FOUNDER_VISIT_INTERVAL == 0 && week <= FOUNDER_VISIT_LAST_WEEK {
        Some((week / FOUNDER_VISIT_INTERVAL - 1) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GameConfig, SessionRules};

    fn session() -> GameSession {
        GameSession::new(&GameConfig::default().session)
    }

    #[test]
    fn weekly_limit_blocks_third_conversation() {
        let mut session = session();
        assert!(session.can_talk("Rick", 12).is_ok());
        session.record_conversation("Rick");
        session.record_conversation("Ava");

        assert!(session.weekly_limit_reached());
        assert_eq!(
            session.can_talk("Max", 12),
            Err(DialogueError::WeeklyLimitReached { limit: 2 })
        );
    }

    #[test]
    fn rejects_repeat_talk_and_exhausted_npcs() {
        let mut session = session();
        session.record_conversation("Liam");
        assert_eq!(
            session.can_talk("Liam", 12),
            Err(DialogueError::AlreadyTalked {
                npc: "Liam".to_string()
            })
        );
        assert_eq!(
            session.can_talk("Max", 0),
            Err(DialogueError::NoQuestionsLeft {
                npc: "Max".to_string()
            })
        );
    }

    #[test]
    fn progress_survives_week_advance_but_talk_flags_do_not() {
        let mut session = session();
        session.record_conversation("Ava");
        assert_eq!(session.progress("Ava"), 1);

        let advance = session.advance_week();
        assert_eq!(
            advance,
            WeekAdvance::Advanced {
                week: 2,
                founder_visit: None
            }
        );
        assert_eq!(session.talked_count(), 0);
        assert_eq!(session.progress("Ava"), 1);
        assert!(session.can_talk("Ava", 12).is_ok());
    }

    #[test]
    fn founder_visits_every_third_week() {
        assert_eq!(founder_visit_for(1), None);
        assert_eq!(founder_visit_for(3), Some(0));
        assert_eq!(founder_visit_for(6), Some(1));
        assert_eq!(founder_visit_for(9), Some(2));
        assert_eq!(founder_visit_for(12), Some(3));
        assert_eq!(founder_visit_for(15), None);
    }

    #[test]
    fn advancing_past_last_week_finishes() {
        let mut session = session();
        for _ in 1..12 {
            assert!(matches!(
                session.advance_week(),
                WeekAdvance::Advanced { .. }
            ));
        }
        assert_eq!(session.week(), 12);
        assert!(session.is_final_week());
        assert_eq!(session.advance_week(), WeekAdvance::Finished);
    }

    #[test]
    fn only_the_week_twelve_founder_visit_ends_the_run() {
        let mut session = session();
        while session.week() < 12 {
            assert!(!session.founder_visit_ends_run());
            session.advance_week();
        }
        assert!(session.founder_visit_ends_run());

        let short = SessionRules {
            weeks_total: 9,
            ..GameConfig::default().session
        };
        let mut session = GameSession::new(&short);
        while session.week() < 9 {
            session.advance_week();
        }
        assert!(session.is_final_week());
        assert!(!session.founder_visit_ends_run());
    }

    #[test]
    fn new_game_keeps_player_name_only() {
        let rules = GameConfig::default().session;
        let mut session = GameSession::new(&rules);
        session.set_player_name("Dana");
        session.record_conversation("Rick");
        session.advance_week();
        session.set_has_save(true);
        session.remember_allocation(Allocation::default());

        session.new_game(&rules);
        assert_eq!(session.player_name(), "Dana");
        assert_eq!(session.week(), 1);
        assert_eq!(session.progress("Rick"), 0);
        assert!(!session.has_save());
        assert!(session.last_allocation().is_none());
    }
}
