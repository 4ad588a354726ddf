//! Systems that move the run forward: session start, investment, weeks, endings.
use bevy::{
    ecs::message::{MessageReader, MessageWriter},
    prelude::*,
};

use crate::{
    company::{
        ending::{EndReason, EndingReport, StatsSnapshot},
        events::{
            GameEndRequested, GameEnded, InvestmentAction, InvestmentSettled,
            SessionStartRequested, StatsChanged, ToastRequested, WeekAdvanceRequested,
            WeekAdvanced,
        },
        investment::{follow_up_minigame, max_budget, InvestmentDraft},
        session::{GameSession, WeekAdvance},
        stats::{format_number, CompanyStats, StatEffects},
        team::{TeamMoods, WEEKLY_MOOD_RECOVERY},
    },
    core::{
        config::GameConfig,
        state::{GameScreen, OfficePhase},
    },
    dialogue::founders::PendingFounderVisit,
    minigame::PendingMinigame,
    npc::roster::NpcRoster,
};

const INVESTMENT_TOAST_SECONDS: f32 = 1.2;

/// Applies `effects` and announces the change. Returns the previous stats.
pub fn apply_stat_effects(
    stats: &mut CompanyStats,
    effects: &StatEffects,
    changes: &mut MessageWriter<StatsChanged>,
) -> CompanyStats {
    let previous = stats.apply(effects);
    if previous != *stats {
        changes.write(StatsChanged {
            previous,
            current: *stats,
        });
    }
    previous
}

/// Enters the office, resetting the run first when a fresh start was asked for.
#[allow(clippy::too_many_arguments)]
pub fn start_session(
    mut requests: MessageReader<SessionStartRequested>,
    config: Res<GameConfig>,
    roster: Res<NpcRoster>,
    mut session: ResMut<GameSession>,
    mut stats: ResMut<CompanyStats>,
    mut moods: ResMut<TeamMoods>,
    mut pending_founder: ResMut<PendingFounderVisit>,
    mut next_screen: ResMut<NextState<GameScreen>>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    if request.fresh || !session.has_save() {
        session.new_game(&config.session);
        *stats = CompanyStats::from_starting(&config.stats);
        *moods = TeamMoods::from_starting(roster.starting_moods());
        *pending_founder = PendingFounderVisit::default();
        info!(
            "New run for {}: {} weeks, ${} in the bank",
            session.player_name(),
            session.weeks_total(),
            stats.funds
        );
        next_phase.set(OfficePhase::Investment);
    } else {
        info!(
            "Resuming week {}/{} for {}",
            session.week(),
            session.weeks_total(),
            session.player_name()
        );
        next_phase.set(OfficePhase::Roaming);
    }

    next_screen.set(GameScreen::Office);
}

/// Opens the weekly budget, or skips straight past it when nothing can be spent.
pub fn open_investment(
    mut commands: Commands,
    config: Res<GameConfig>,
    stats: Res<CompanyStats>,
    session: Res<GameSession>,
    moods: Res<TeamMoods>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    if max_budget(stats.funds, &config.investment) <= 0 {
        info!("No budget available in week {}; skipping investment", session.week());
        leave_investment(&mut commands, &config, &session, &moods, &mut next_phase);
        return;
    }
    let draft = InvestmentDraft::new(stats.funds, &config.investment);
    info!(
        "Week {} investment opened with ${} to spend",
        session.week(),
        format_number(draft.budget())
    );
    commands.insert_resource(draft);
}

pub fn close_investment(mut commands: Commands) {
    commands.remove_resource::<InvestmentDraft>();
}

/// Applies investment panel input.
#[allow(clippy::too_many_arguments)]
pub fn handle_investment_actions(
    mut commands: Commands,
    mut actions: MessageReader<InvestmentAction>,
    config: Res<GameConfig>,
    mut draft: ResMut<InvestmentDraft>,
    mut stats: ResMut<CompanyStats>,
    mut session: ResMut<GameSession>,
    moods: Res<TeamMoods>,
    mut stat_changes: MessageWriter<StatsChanged>,
    mut settled: MessageWriter<InvestmentSettled>,
    mut toasts: MessageWriter<ToastRequested>,
    mut game_end: MessageWriter<GameEndRequested>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    for action in actions.read() {
        match *action {
            InvestmentAction::Invest(category) => {
                if !draft.invest(category) {
                    debug!("Cannot invest more in {}: {}", category.label(), draft.budget_line());
                }
            }
            InvestmentAction::Withdraw(category) => {
                if !draft.withdraw(category) {
                    debug!("Nothing to withdraw from {}", category.label());
                }
            }
            InvestmentAction::Confirm => {
                match draft.settle(&mut stats) {
                    Some(receipt) => {
                        stat_changes.write(StatsChanged {
                            previous: receipt.previous,
                            current: *stats,
                        });
                        settled.write(InvestmentSettled {
                            week: session.week(),
                            allocation: receipt.allocation,
                            spent: receipt.spent,
                            effects: receipt.effects,
                        });
                        toasts.write(ToastRequested::new(
                            receipt.summary(),
                            INVESTMENT_TOAST_SECONDS,
                        ));
                        session.remember_allocation(receipt.allocation);
                        info!("Week {}: {}", session.week(), receipt.summary());

                        if stats.is_bankrupt() {
                            commands.remove_resource::<InvestmentDraft>();
                            game_end.write(GameEndRequested {
                                reason: EndReason::Bankrupt,
                            });
                            return;
                        }
                    }
                    None => debug!("Confirmed an empty allocation; treating it as a skip"),
                }
                leave_investment(&mut commands, &config, &session, &moods, &mut next_phase);
                return;
            }
            InvestmentAction::Skip => {
                info!("Week {}: investment skipped", session.week());
                leave_investment(&mut commands, &config, &session, &moods, &mut next_phase);
                return;
            }
        }
    }
}

/// Queues the follow-up minigame notice, or returns to the office floor.
fn leave_investment(
    commands: &mut Commands,
    config: &GameConfig,
    session: &GameSession,
    moods: &TeamMoods,
    next_phase: &mut NextState<OfficePhase>,
) {
    commands.remove_resource::<InvestmentDraft>();
    let cleanup_mood = moods.get(&config.minigames.cleanup_npc);
    match follow_up_minigame(session.week(), &config.minigames, cleanup_mood) {
        Some(kind) => {
            info!("Week {}: {:?} incoming", session.week(), kind);
            commands.insert_resource(PendingMinigame(kind));
            next_phase.set(OfficePhase::Notice);
        }
        None => next_phase.set(OfficePhase::Roaming),
    }
}

/// Moves the calendar when the weekly talk limit has been used up.
pub fn advance_week(
    mut requests: MessageReader<WeekAdvanceRequested>,
    mut session: ResMut<GameSession>,
    mut pending_founder: ResMut<PendingFounderVisit>,
    mut advanced: MessageWriter<WeekAdvanced>,
    mut game_end: MessageWriter<GameEndRequested>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    if requests.read().count() == 0 {
        return;
    }

    match session.advance_week() {
        WeekAdvance::Finished => {
            info!("Final week complete");
            game_end.write(GameEndRequested {
                reason: EndReason::Final,
            });
        }
        WeekAdvance::Advanced {
            week,
            founder_visit,
        } => {
            info!(
                "Week {}/{} begins{}",
                week,
                session.weeks_total(),
                if founder_visit.is_some() {
                    " with a founder visit"
                } else {
                    ""
                }
            );
            pending_founder.index = founder_visit;
            advanced.write(WeekAdvanced {
                week,
                weeks_total: session.weeks_total(),
                founder_visit,
            });
            next_phase.set(OfficePhase::WeekBanner);
        }
    }
}

pub fn recover_team_moods(mut weeks: MessageReader<WeekAdvanced>, mut moods: ResMut<TeamMoods>) {
    for _ in weeks.read() {
        moods.recover_all(WEEKLY_MOOD_RECOVERY);
    }
}

/// Picks the ending and switches to the end screen.
pub fn resolve_game_end(
    mut commands: Commands,
    mut requests: MessageReader<GameEndRequested>,
    screen: Res<State<GameScreen>>,
    mut session: ResMut<GameSession>,
    stats: Res<CompanyStats>,
    mut ended: MessageWriter<GameEnded>,
    mut next_screen: ResMut<NextState<GameScreen>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };
    if *screen.get() == GameScreen::End {
        debug!("Ignoring end request {:?}; the run is already over", request.reason);
        return;
    }

    let snapshot = StatsSnapshot {
        week: session.week().min(session.weeks_total()),
        weeks_total: session.weeks_total(),
        stats: *stats,
    };
    let report = EndingReport::new(snapshot, request.reason);
    info!(
        "Run over after week {}: {} ({:?})",
        snapshot.week,
        report.ending.title(),
        request.reason
    );

    session.set_has_save(false);
    commands.insert_resource(report);
    ended.write(GameEnded { report });
    next_screen.set(GameScreen::End);
}

#[cfg(test)]
mod tests {
    use std::{env, time::SystemTime};

    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::{
        company::{
            ending::Ending,
            history::SessionHistoryLog,
            investment::Category,
            CompanyPlugin,
        },
        core::CorePlugin,
        minigame::{MinigameFinished, MinigameKind},
        npc::roster::Roster,
    };

    fn app() -> App {
        let roster = Roster::embedded().expect("built-in roster parses");
        let stamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let log_path = env::temp_dir().join(format!("startup_sprint_company_{stamp}.jsonl"));

        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            StatesPlugin,
            CorePlugin::from_config(GameConfig::default()),
        ))
        .insert_resource(roster.npcs)
        .insert_resource(roster.founders)
        .add_message::<MinigameFinished>()
        .add_plugins(CompanyPlugin)
        .insert_resource(SessionHistoryLog::new(log_path));
        app.update();
        app
    }

    fn send<M: Message>(app: &mut App, message: M) {
        app.world_mut().write_message(message);
    }

    fn phase(app: &App) -> OfficePhase {
        *app.world().resource::<State<OfficePhase>>().get()
    }

    fn screen(app: &App) -> GameScreen {
        *app.world().resource::<State<GameScreen>>().get()
    }

    fn start_fresh(app: &mut App) {
        send(app, SessionStartRequested { fresh: true });
        app.update();
        app.update();
    }

    #[test]
    fn fresh_start_opens_the_investment_panel() {
        let mut app = app();
        start_fresh(&mut app);

        assert_eq!(screen(&app), GameScreen::Office);
        assert_eq!(phase(&app), OfficePhase::Investment);
        let draft = app.world().resource::<InvestmentDraft>();
        assert_eq!(draft.budget(), 12_000);
        assert_eq!(app.world().resource::<TeamMoods>().get("Liam"), Some(80));
    }

    #[test]
    fn confirming_spends_the_allocation_and_returns_to_roaming() {
        let mut app = app();
        start_fresh(&mut app);

        send(&mut app, InvestmentAction::Invest(Category::Tech));
        send(&mut app, InvestmentAction::Invest(Category::Tech));
        send(&mut app, InvestmentAction::Invest(Category::Hiring));
        app.update();
        send(&mut app, InvestmentAction::Confirm);
        app.update();
        app.update();

        let stats = *app.world().resource::<CompanyStats>();
        assert_eq!(stats.funds, 47_000);
        assert_eq!(stats.product, 24);
        assert_eq!(stats.morale, 72);
        assert_eq!(phase(&app), OfficePhase::Roaming);
        assert!(!app.world().contains_resource::<InvestmentDraft>());

        let session = app.world().resource::<GameSession>();
        assert_eq!(session.last_allocation().map(|a| a.total()), Some(3_000));
    }

    #[test]
    fn spending_the_last_dollar_ends_the_run_bankrupt() {
        let mut app = app();
        start_fresh(&mut app);
        let rules = app.world().resource::<GameConfig>().investment;
        app.world_mut().resource_mut::<CompanyStats>().funds = 2_000;
        app.world_mut()
            .insert_resource(InvestmentDraft::new(2_000, &rules));
        assert_eq!(app.world().resource::<InvestmentDraft>().budget(), 2_000);

        send(&mut app, InvestmentAction::Invest(Category::Tech));
        send(&mut app, InvestmentAction::Invest(Category::Marketing));
        app.update();
        send(&mut app, InvestmentAction::Confirm);
        app.update();
        app.update();
        app.update();

        assert_eq!(app.world().resource::<CompanyStats>().funds, 0);
        assert!(!app.world().contains_resource::<InvestmentDraft>());
        assert_ne!(phase(&app), OfficePhase::Roaming);
        assert_eq!(screen(&app), GameScreen::End);
        let report = app.world().resource::<EndingReport>();
        assert_eq!(report.reason, EndReason::Bankrupt);
        assert_eq!(report.ending, Ending::Bankrupt);
    }

    #[test]
    fn grumpy_intern_triggers_the_cleanup_notice() {
        let mut app = app();
        start_fresh(&mut app);
        app.world_mut()
            .resource_mut::<TeamMoods>()
            .adjust("Liam", -60);

        send(&mut app, InvestmentAction::Skip);
        app.update();
        app.update();

        assert_eq!(phase(&app), OfficePhase::Notice);
        assert_eq!(
            app.world().resource::<PendingMinigame>().0,
            MinigameKind::Cleanup
        );
    }

    #[test]
    fn week_advance_recovers_moods_and_queues_founders() {
        let mut app = app();
        start_fresh(&mut app);
        app.world_mut()
            .resource_mut::<TeamMoods>()
            .adjust("Ava", -30);

        send(&mut app, WeekAdvanceRequested);
        app.update();
        app.update();
        assert_eq!(phase(&app), OfficePhase::WeekBanner);
        assert_eq!(app.world().resource::<GameSession>().week(), 2);
        assert_eq!(app.world().resource::<TeamMoods>().get("Ava"), Some(60));
        assert_eq!(app.world().resource::<PendingFounderVisit>().index, None);

        send(&mut app, WeekAdvanceRequested);
        app.update();
        assert_eq!(app.world().resource::<PendingFounderVisit>().index, Some(0));
    }

    #[test]
    fn bankruptcy_ends_the_run_and_clears_the_save() {
        let mut app = app();
        start_fresh(&mut app);
        app.world_mut().resource_mut::<GameSession>().set_has_save(true);
        app.world_mut().resource_mut::<CompanyStats>().funds = 0;

        send(
            &mut app,
            GameEndRequested {
                reason: EndReason::Bankrupt,
            },
        );
        app.update();
        app.update();
        app.update();

        assert_eq!(screen(&app), GameScreen::End);
        assert_eq!(phase(&app), OfficePhase::Inactive);
        let report = app.world().resource::<EndingReport>();
        assert_eq!(report.ending, Ending::Bankrupt);
        assert!(!app.world().resource::<GameSession>().has_save());
    }

    #[test]
    fn continuing_without_a_save_starts_over() {
        let mut app = app();
        send(&mut app, SessionStartRequested { fresh: false });
        app.update();
        app.update();
        assert_eq!(phase(&app), OfficePhase::Investment);
        assert_eq!(app.world().resource::<TeamMoods>().len(), 4);
    }
}
