//! Dialogue plugin wiring conversations and founder visits into the office phases.
use bevy::prelude::*;

use crate::{
    core::state::OfficePhase,
    dialogue::{
        conversation::Conversation,
        events::{ConversationClosed, ConversationInput, FounderVisitDismissed, TalkRequested},
        systems::{
            close_founder_visit, conversation_keyboard_input, discard_conversation,
            finish_founder_visit, founder_keyboard_input, handle_conversation_input,
            open_founder_visit, start_conversation, tick_conversation,
        },
    },
};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TalkRequested>()
            .add_message::<ConversationInput>()
            .add_message::<ConversationClosed>()
            .add_message::<FounderVisitDismissed>()
            .add_systems(OnExit(OfficePhase::Dialogue), discard_conversation)
            .add_systems(OnEnter(OfficePhase::FounderVisit), open_founder_visit)
            .add_systems(OnExit(OfficePhase::FounderVisit), close_founder_visit)
            .add_systems(
                Update,
                (
                    start_conversation.run_if(in_state(OfficePhase::Roaming)),
                    (
                        conversation_keyboard_input,
                        tick_conversation,
                        handle_conversation_input,
                    )
                        .chain()
                        .run_if(
                            in_state(OfficePhase::Dialogue).and(resource_exists::<Conversation>),
                        ),
                    (founder_keyboard_input, finish_founder_visit)
                        .chain()
                        .run_if(in_state(OfficePhase::FounderVisit)),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use std::{env, time::SystemTime};

    use bevy::{ecs::message::MessageReader, state::app::StatesPlugin};

    use super::*;
    use crate::{
        company::{
            ending::{EndReason, EndingReport},
            events::{InvestmentAction, SessionStartRequested, WeekAdvanceRequested},
            history::SessionHistoryLog,
            investment::InvestmentDraft,
            session::GameSession,
            stats::CompanyStats,
            team::TeamMoods,
            CompanyPlugin,
        },
        core::{config::GameConfig, state::GameScreen, CorePlugin},
        dialogue::{
            conversation::ConversationStage,
            founders::{FounderVisitLine, PendingFounderVisit},
        },
        minigame::MinigameFinished,
        npc::roster::Roster,
    };

    fn app() -> App {
        let roster = Roster::embedded().expect("built-in roster parses");
        let stamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let log_path = env::temp_dir().join(format!("startup_sprint_dialogue_{stamp}.jsonl"));

        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            StatesPlugin,
            CorePlugin::from_config(GameConfig::default()),
        ))
        .insert_resource(roster.npcs)
        .insert_resource(roster.founders)
        .init_resource::<ButtonInput<KeyCode>>()
        .add_message::<MinigameFinished>()
        .add_plugins((CompanyPlugin, DialoguePlugin))
        .insert_resource(SessionHistoryLog::new(log_path));
        app.update();

        app.world_mut()
            .write_message(SessionStartRequested { fresh: true });
        app.update();
        app.update();
        app.world_mut().write_message(InvestmentAction::Skip);
        app.update();
        app.update();
        app
    }

    #[derive(Resource, Default)]
    struct WeekRequests(usize);

    fn count_week_requests(
        mut requests: MessageReader<WeekAdvanceRequested>,
        mut seen: ResMut<WeekRequests>,
    ) {
        seen.0 += requests.read().count();
    }

    fn phase(app: &App) -> OfficePhase {
        *app.world().resource::<State<OfficePhase>>().get()
    }

    fn screen(app: &App) -> GameScreen {
        *app.world().resource::<State<GameScreen>>().get()
    }

    fn skip_to_week(app: &mut App, week: u32) {
        let mut session = app.world_mut().resource_mut::<GameSession>();
        while session.week() < week {
            session.advance_week();
        }
    }

    /// Opens the founder visit for the current week and dismisses it.
    fn host_founder(app: &mut App, index: usize) {
        app.world_mut().resource_mut::<PendingFounderVisit>().index = Some(index);
        app.world_mut()
            .resource_mut::<NextState<OfficePhase>>()
            .set(OfficePhase::FounderVisit);
        app.update();
        assert!(app.world().contains_resource::<FounderVisitLine>());

        app.world_mut().write_message(FounderVisitDismissed);
        app.update();
        app.update();
        app.update();
    }

    fn input(app: &mut App, input: ConversationInput) {
        app.world_mut().write_message(input);
        app.update();
    }

    /// Talks to `npc` and picks the first choice, leaving the result on screen.
    fn talk_and_choose(app: &mut App, npc: &str) {
        app.world_mut().write_message(TalkRequested { npc: npc.into() });
        app.update();
        app.update();
        assert_eq!(phase(app), OfficePhase::Dialogue);

        while app.world().resource::<Conversation>().stage() != ConversationStage::Choosing {
            input(app, ConversationInput::Advance);
        }
        input(app, ConversationInput::Choose(0));
    }

    #[test]
    fn finished_conversation_returns_to_roaming() {
        let mut app = app();
        assert_eq!(phase(&app), OfficePhase::Roaming);

        talk_and_choose(&mut app, "Rick");
        let conversation = app.world().resource::<Conversation>();
        assert_eq!(conversation.stage(), ConversationStage::Result);
        let session = app.world().resource::<GameSession>();
        assert!(session.has_talked("Rick"));
        assert_eq!(session.progress("Rick"), 1);
        let rick_mood = app.world().resource::<TeamMoods>().get("Rick");
        assert!(rick_mood.is_some_and(|mood| (0..=100).contains(&mood)));

        input(&mut app, ConversationInput::Advance);
        app.update();
        assert!(!app.world().contains_resource::<Conversation>());
        assert_eq!(phase(&app), OfficePhase::Roaming);
    }

    #[test]
    fn closing_a_conversation_while_broke_ends_the_run() {
        let mut app = app();
        talk_and_choose(&mut app, "Rick");
        app.world_mut().resource_mut::<CompanyStats>().funds = 0;

        input(&mut app, ConversationInput::Advance);
        app.update();
        app.update();

        assert!(!app.world().contains_resource::<Conversation>());
        assert_eq!(screen(&app), GameScreen::End);
        assert_ne!(phase(&app), OfficePhase::Roaming);
        let report = app.world().resource::<EndingReport>();
        assert_eq!(report.reason, EndReason::Bankrupt);
    }

    #[test]
    fn repeat_talk_in_the_same_week_is_refused() {
        let mut app = app();
        talk_and_choose(&mut app, "Rick");
        input(&mut app, ConversationInput::Advance);
        app.update();

        app.world_mut()
            .write_message(TalkRequested { npc: "Rick".into() });
        app.update();
        app.update();
        assert_eq!(phase(&app), OfficePhase::Roaming);
        assert!(!app.world().contains_resource::<Conversation>());
    }

    #[test]
    fn reaching_the_weekly_limit_advances_the_week() {
        let mut app = app();
        for npc in ["Rick", "Liam"] {
            talk_and_choose(&mut app, npc);
            input(&mut app, ConversationInput::Advance);
            app.update();
            app.update();
        }

        assert_eq!(app.world().resource::<GameSession>().week(), 2);
        assert_eq!(phase(&app), OfficePhase::WeekBanner);
    }

    #[test]
    fn last_talk_of_the_week_requests_a_week_advance() {
        let mut app = app();
        app.init_resource::<WeekRequests>()
            .add_systems(Update, count_week_requests);

        talk_and_choose(&mut app, "Rick");
        input(&mut app, ConversationInput::Advance);
        app.update();
        assert_eq!(app.world().resource::<WeekRequests>().0, 0);
        assert_eq!(phase(&app), OfficePhase::Roaming);

        talk_and_choose(&mut app, "Liam");
        input(&mut app, ConversationInput::Advance);
        app.update();
        assert_eq!(app.world().resource::<WeekRequests>().0, 1);
        assert_ne!(phase(&app), OfficePhase::Roaming);
    }

    #[test]
    fn founder_visit_shows_the_founder_and_tip() {
        let mut app = app();
        app.world_mut().resource_mut::<PendingFounderVisit>().index = Some(0);
        app.world_mut()
            .resource_mut::<NextState<OfficePhase>>()
            .set(OfficePhase::FounderVisit);
        app.update();

        let line = app.world().resource::<FounderVisitLine>();
        assert!(line.text.starts_with("Jared Friedman: "));
    }

    #[test]
    fn founder_visit_leads_into_investment() {
        let mut app = app();
        skip_to_week(&mut app, 3);
        host_founder(&mut app, 0);

        assert_eq!(phase(&app), OfficePhase::Investment);
        assert_eq!(app.world().resource::<PendingFounderVisit>().index, None);
        assert!(!app.world().contains_resource::<FounderVisitLine>());
        assert_eq!(
            *app.world().resource::<State<GameScreen>>().get(),
            GameScreen::Office
        );
    }

    #[test]
    fn week_twelve_founder_visit_ends_the_run() {
        let mut app = app();
        skip_to_week(&mut app, 12);
        host_founder(&mut app, 3);

        assert_eq!(app.world().resource::<PendingFounderVisit>().index, None);
        assert_ne!(phase(&app), OfficePhase::Investment);
        assert!(!app.world().contains_resource::<InvestmentDraft>());
        assert_eq!(screen(&app), GameScreen::End);
        let report = app.world().resource::<EndingReport>();
        assert_eq!(report.reason, EndReason::Final);
        assert_eq!(report.snapshot.week, 12);
    }
}
