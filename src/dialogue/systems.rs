//! Systems that open, drive and close conversations and founder visits.
use std::time::Duration;

use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    prelude::*,
};
use rand::thread_rng;

use crate::{
    company::{
        ending::EndReason,
        events::{ChoiceMade, GameEndRequested, StatsChanged, WeekAdvanceRequested},
        session::GameSession,
        stats::CompanyStats,
        systems::apply_stat_effects,
        team::{roll_choice_mood_swing, TeamMoods},
    },
    core::{config::GameConfig, plugin::SimulationClock, state::OfficePhase},
    dialogue::{
        conversation::{Conversation, ConversationStep},
        errors::DialogueError,
        events::{ConversationClosed, ConversationInput, FounderVisitDismissed, TalkRequested},
        founders::{FounderRoster, FounderVisitLine, PendingFounderVisit},
    },
    npc::roster::NpcRoster,
};

const CHOICE_KEYS: [(KeyCode, KeyCode); 2] = [
    (KeyCode::Digit1, KeyCode::Numpad1),
    (KeyCode::Digit2, KeyCode::Numpad2),
];

/// Opens a conversation when the weekly rules allow it.
pub fn start_conversation(
    mut commands: Commands,
    mut requests: MessageReader<TalkRequested>,
    config: Res<GameConfig>,
    roster: Res<NpcRoster>,
    session: Res<GameSession>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    let Some(request) = requests.read().last().cloned() else {
        return;
    };

    let opened = roster
        .get(&request.npc)
        .ok_or_else(|| DialogueError::UnknownNpc {
            npc: request.npc.clone(),
        })
        .and_then(|npc| {
            session.can_talk(&npc.name, npc.questions.len())?;
            Conversation::begin(
                npc,
                session.progress(&npc.name),
                session.player_name(),
                Duration::from_millis(config.timing.typewriter_ms),
            )
        });

    match opened {
        Ok(conversation) => {
            info!(
                "Conversation with {} opened (question {})",
                conversation.npc(),
                conversation.question_index() + 1
            );
            commands.insert_resource(conversation);
            next_phase.set(OfficePhase::Dialogue);
        }
        Err(error) => debug!("Talk request rejected: {}", error),
    }
}

pub fn conversation_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut inputs: MessageWriter<ConversationInput>,
) {
    if keys.any_just_pressed([KeyCode::KeyE, KeyCode::Space, KeyCode::Enter]) {
        inputs.write(ConversationInput::Advance);
    }
    for (index, (digit, numpad)) in CHOICE_KEYS.into_iter().enumerate() {
        if keys.any_just_pressed([digit, numpad]) {
            inputs.write(ConversationInput::Choose(index));
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_conversation_input(
    mut commands: Commands,
    mut inputs: MessageReader<ConversationInput>,
    mut conversation: ResMut<Conversation>,
    mut session: ResMut<GameSession>,
    mut stats: ResMut<CompanyStats>,
    mut moods: ResMut<TeamMoods>,
    mut changes: MessageWriter<StatsChanged>,
    mut choices: MessageWriter<ChoiceMade>,
    mut closed: MessageWriter<ConversationClosed>,
    mut week_requests: MessageWriter<WeekAdvanceRequested>,
    mut end_requests: MessageWriter<GameEndRequested>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    for input in inputs.read() {
        match *input {
            ConversationInput::Advance => {
                if conversation.advance() != ConversationStep::Finished {
                    continue;
                }

                let npc = conversation.npc().to_string();
                commands.remove_resource::<Conversation>();
                closed.write(ConversationClosed { npc: npc.clone() });
                info!("Conversation with {} closed", npc);

                if stats.is_bankrupt() {
                    end_requests.write(GameEndRequested {
                        reason: EndReason::Bankrupt,
                    });
                } else if session.weekly_limit_reached() {
                    week_requests.write(WeekAdvanceRequested);
                } else {
                    next_phase.set(OfficePhase::Roaming);
                }
                return;
            }
            ConversationInput::Choose(index) => {
                let choice = match conversation.choose(index) {
                    Ok(choice) => choice,
                    Err(error) => {
                        debug!("Choice rejected: {}", error);
                        continue;
                    }
                };

                let npc = conversation.npc().to_string();
                apply_stat_effects(&mut stats, &choice.effects, &mut changes);
                let mood_delta = roll_choice_mood_swing(&mut thread_rng());
                let mood = moods.adjust(&npc, mood_delta);
                session.record_conversation(&npc);
                info!(
                    "{} chose '{}' with {} (mood {:+} -> {:?})",
                    session.player_name(),
                    choice.label,
                    npc,
                    mood_delta,
                    mood
                );

                choices.write(ChoiceMade {
                    week: session.week(),
                    npc,
                    question_index: conversation.question_index(),
                    choice_index: index,
                    label: choice.label,
                    effects: choice.effects,
                    mood_delta,
                });
            }
        }
    }
}

pub fn tick_conversation(clock: Res<SimulationClock>, mut conversation: ResMut<Conversation>) {
    conversation.tick(clock.delta());
}

/// Leaving the dialogue phase for any reason drops the open conversation.
pub fn discard_conversation(mut commands: Commands) {
    commands.remove_resource::<Conversation>();
}

/// Picks the visiting founder's tip for the current stats.
pub fn open_founder_visit(
    mut commands: Commands,
    pending: Res<PendingFounderVisit>,
    founders: Res<FounderRoster>,
    stats: Res<CompanyStats>,
    mut dismissed: MessageWriter<FounderVisitDismissed>,
) {
    let line = pending
        .index
        .and_then(|index| founders.tip_for(index, &stats))
        .map(|(founder, tip)| FounderVisitLine::new(founder, tip));

    match line {
        Some(line) => {
            info!("Founder visit: {}", line.text);
            commands.insert_resource(line);
        }
        None => {
            warn!("Founder visit without a matching tip, skipping");
            dismissed.write(FounderVisitDismissed);
        }
    }
}

pub fn founder_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut dismissed: MessageWriter<FounderVisitDismissed>,
) {
    if keys.any_just_pressed([KeyCode::KeyE, KeyCode::Space, KeyCode::Enter]) {
        dismissed.write(FounderVisitDismissed);
    }
}

/// After the week 12 founder talk on the final week the run ends, other visits go to investment.
pub fn finish_founder_visit(
    mut dismissed: MessageReader<FounderVisitDismissed>,
    session: Res<GameSession>,
    mut pending: ResMut<PendingFounderVisit>,
    mut end_requests: MessageWriter<GameEndRequested>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    if dismissed.read().count() == 0 {
        return;
    }

    pending.index = None;
    if session.founder_visit_ends_run() {
        end_requests.write(GameEndRequested {
            reason: EndReason::Final,
        });
    } else {
        next_phase.set(OfficePhase::Investment);
    }
}

pub fn close_founder_visit(mut commands: Commands) {
    commands.remove_resource::<FounderVisitLine>();
}
