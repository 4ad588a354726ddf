//! Session history: a rolling in-memory record plus a JSONL file on disk.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{ecs::message::MessageReader, log::warn, prelude::*};
use serde::Serialize;

use super::{
    ending::{EndReason, Ending, StatsSnapshot},
    events::{ChoiceMade, GameEnded, InvestmentSettled, WeekAdvanced},
    investment::Allocation,
    stats::StatEffects,
};
use crate::minigame::{MinigameFinished, MinigameOutcome};

const DEFAULT_SESSION_HISTORY_LOG_PATH: &str = "logs/session_history.jsonl";

const DEFAULT_SESSION_HISTORY_CAPACITY: usize = 64;

/// Most recent history entries, oldest first.
#[derive(Resource, Debug)]
pub struct SessionHistory {
    capacity: usize,
    records: VecDeque<HistoryRecord>,
}

impl SessionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: HistoryRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_HISTORY_CAPACITY)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub occurred_at_seconds: f64,
    pub event: HistoryEvent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum HistoryEvent {
    Choice {
        week: u32,
        npc: String,
        question_index: usize,
        choice_index: usize,
        label: String,
        effects: StatEffects,
        mood_delta: i32,
    },
    Investment {
        week: u32,
        allocation: Allocation,
        spent: i64,
        effects: StatEffects,
    },
    WeekAdvanced {
        week: u32,
        founder_visit: Option<usize>,
    },
    Minigame {
        outcome: MinigameOutcome,
    },
    Ending {
        ending: Ending,
        reason: EndReason,
        snapshot: StatsSnapshot,
    },
}

/// Collects gameplay messages into the history and the pending file log.
#[allow(clippy::too_many_arguments)]
pub fn record_session_history(
    time: Res<Time>,
    mut history: ResMut<SessionHistory>,
    mut log: ResMut<SessionHistoryLog>,
    mut choices: MessageReader<ChoiceMade>,
    mut investments: MessageReader<InvestmentSettled>,
    mut weeks: MessageReader<WeekAdvanced>,
    mut minigames: MessageReader<MinigameFinished>,
    mut endings: MessageReader<GameEnded>,
) {
    let now = time.elapsed_secs_f64();
    let mut events = Vec::new();

    events.extend(choices.read().map(|choice| HistoryEvent::Choice {
        week: choice.week,
        npc: choice.npc.clone(),
        question_index: choice.question_index,
        choice_index: choice.choice_index,
        label: choice.label.clone(),
        effects: choice.effects,
        mood_delta: choice.mood_delta,
    }));
    events.extend(investments.read().map(|settled| HistoryEvent::Investment {
        week: settled.week,
        allocation: settled.allocation,
        spent: settled.spent,
        effects: settled.effects,
    }));
    events.extend(weeks.read().map(|advanced| HistoryEvent::WeekAdvanced {
        week: advanced.week,
        founder_visit: advanced.founder_visit,
    }));
    events.extend(minigames.read().map(|finished| HistoryEvent::Minigame {
        outcome: finished.outcome,
    }));
    events.extend(endings.read().map(|ended| HistoryEvent::Ending {
        ending: ended.report.ending,
        reason: ended.report.reason,
        snapshot: ended.report.snapshot,
    }));

    for event in events {
        let record = HistoryRecord {
            occurred_at_seconds: now,
            event,
        };
        log.push(&record);
        history.push(record);
    }
}

/// Append-only JSONL writer for history records.
#[derive(Resource, Debug)]
pub struct SessionHistoryLog {
    output_path: PathBuf,
    pending: Vec<HistoryRecord>,
}

impl SessionHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &HistoryRecord) {
        self.pending.push(record.clone());
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        for record in std::mem::take(&mut self.pending) {
            serde_json::to_writer(&mut file, &record)?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for SessionHistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_HISTORY_LOG_PATH)
    }
}

pub fn flush_session_history_log(mut log: ResMut<SessionHistoryLog>) {
    if let Err(err) = log.flush() {
        warn!(
            "Failed to persist session history to {:?}: {}",
            log.path(),
            err
        );
    }
}
