//! CompanyPlugin owns the run's resources and the systems that advance it.
use bevy::prelude::*;

use crate::{
    company::{
        events::{
            ChoiceMade, GameEndRequested, GameEnded, InvestmentAction, InvestmentSettled,
            SessionStartRequested, StatsChanged, ToastRequested, WeekAdvanceRequested,
            WeekAdvanced,
        },
        history::{
            flush_session_history_log, record_session_history, SessionHistory, SessionHistoryLog,
        },
        investment::InvestmentDraft,
        session::GameSession,
        stats::CompanyStats,
        systems::{
            advance_week, close_investment, handle_investment_actions, open_investment,
            recover_team_moods, resolve_game_end, start_session,
        },
        team::TeamMoods,
    },
    core::{config::GameConfig, state::OfficePhase},
    dialogue::founders::PendingFounderVisit,
};

pub struct CompanyPlugin;

impl Plugin for CompanyPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(GameSession::new(&config.session))
            .insert_resource(CompanyStats::from_starting(&config.stats))
            .init_resource::<TeamMoods>()
            .init_resource::<PendingFounderVisit>()
            .init_resource::<SessionHistory>()
            .init_resource::<SessionHistoryLog>()
            .add_message::<InvestmentAction>()
            .add_message::<StatsChanged>()
            .add_message::<SessionStartRequested>()
            .add_message::<WeekAdvanceRequested>()
            .add_message::<WeekAdvanced>()
            .add_message::<GameEndRequested>()
            .add_message::<GameEnded>()
            .add_message::<InvestmentSettled>()
            .add_message::<ChoiceMade>()
            .add_message::<ToastRequested>()
            .add_systems(OnEnter(OfficePhase::Investment), open_investment)
            .add_systems(OnExit(OfficePhase::Investment), close_investment)
            .add_systems(
                Update,
                (
                    start_session,
                    handle_investment_actions.run_if(
                        in_state(OfficePhase::Investment).and(resource_exists::<InvestmentDraft>),
                    ),
                    advance_week,
                    recover_team_moods,
                    resolve_game_end,
                )
                    .chain(),
            )
            .add_systems(PostUpdate, record_session_history)
            .add_systems(Last, flush_session_history_log);

        info!(
            "CompanyPlugin registered: starting funds ${}",
            config.stats.funds
        );
    }
}
