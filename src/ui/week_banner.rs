// src/ui/week_banner.rs
//
// Full-screen "WEEK n / total" card between weeks.

use bevy::prelude::*;

use crate::{
    company::session::GameSession,
    core::{config::GameConfig, plugin::SimulationClock, state::OfficePhase},
    dialogue::founders::PendingFounderVisit,
    ui::widgets::{full_screen_column, text, BUTTON_TEXT_COLOR},
};

const BANNER_BACKGROUND: Color = Color::srgba(0.043, 0.075, 0.165, 0.85);

#[derive(Component)]
pub struct WeekBannerRoot;

#[derive(Resource, Debug)]
pub struct WeekBannerTimer(pub Timer);

pub fn week_number_label(session: &GameSession) -> String {
    format!("{} / {}", session.week(), session.weeks_total())
}

/// Phase that follows the banner.
pub fn after_banner(pending: &PendingFounderVisit) -> OfficePhase {
    if pending.index.is_some() {
        OfficePhase::FounderVisit
    } else {
        OfficePhase::Investment
    }
}

pub fn spawn_week_banner(mut commands: Commands, session: Res<GameSession>, config: Res<GameConfig>) {
    commands.insert_resource(WeekBannerTimer(Timer::from_seconds(
        config.timing.week_banner_seconds,
        TimerMode::Once,
    )));
    commands.spawn((
        full_screen_column(12.0),
        BackgroundColor(BANNER_BACKGROUND),
        GlobalZIndex(15),
        WeekBannerRoot,
        Name::new("Week Banner"),
        children![
            text("WEEK", 28.0, BUTTON_TEXT_COLOR),
            text(week_number_label(&session), 72.0, Color::WHITE),
        ],
    ));
}

pub fn run_week_banner(
    clock: Res<SimulationClock>,
    mut timer: ResMut<WeekBannerTimer>,
    pending: Res<PendingFounderVisit>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    if timer.0.tick(clock.delta()).just_finished() {
        next_phase.set(after_banner(&pending));
    }
}

pub fn close_week_banner(mut commands: Commands) {
    commands.remove_resource::<WeekBannerTimer>();
}
