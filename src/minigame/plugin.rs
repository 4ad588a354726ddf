//! MinigamePlugin runs the bug hunt and cleanup office phases.
use bevy::prelude::*;

use crate::{
    core::state::OfficePhase,
    minigame::{
        bug_hunt::BugInvasion,
        cleanup::CleanupRound,
        systems::{
            despawn_minigame_entities, run_bug_hunt, run_cleanup, squash_clicked_bugs,
            start_bug_hunt, start_cleanup,
        },
        MinigameFinished,
    },
};

pub struct MinigamePlugin;

impl Plugin for MinigamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<MinigameFinished>()
            .add_systems(OnEnter(OfficePhase::BugHunt), start_bug_hunt)
            .add_systems(OnExit(OfficePhase::BugHunt), despawn_minigame_entities)
            .add_systems(OnEnter(OfficePhase::Cleanup), start_cleanup)
            .add_systems(OnExit(OfficePhase::Cleanup), despawn_minigame_entities)
            .add_systems(
                Update,
                (squash_clicked_bugs, run_bug_hunt)
                    .chain()
                    .run_if(in_state(OfficePhase::BugHunt).and(resource_exists::<BugInvasion>)),
            )
            .add_systems(
                Update,
                run_cleanup
                    .run_if(in_state(OfficePhase::Cleanup).and(resource_exists::<CleanupRound>)),
            );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::{ecs::message::MessageReader, state::app::StatesPlugin, time::TimeUpdateStrategy};

    use super::*;
    use crate::{
        company::{
            ending::EndReason,
            events::{GameEndRequested, StatsChanged, ToastRequested},
            stats::CompanyStats,
            team::TeamMoods,
        },
        core::{config::GameConfig, state::GameScreen, CorePlugin},
        minigame::{components::TrashSprite, MinigameOutcome},
        world::layout::OfficeLayout,
    };

    #[derive(Resource, Default)]
    struct Seen {
        endings: Vec<EndReason>,
        outcomes: Vec<MinigameOutcome>,
    }

    fn collect(
        mut endings: MessageReader<GameEndRequested>,
        mut finished: MessageReader<MinigameFinished>,
        mut seen: ResMut<Seen>,
    ) {
        seen.endings.extend(endings.read().map(|message| message.reason));
        seen.outcomes.extend(finished.read().map(|message| message.outcome));
    }

    fn app(step: Duration, stats: CompanyStats) -> App {
        let config = GameConfig::default();
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, CorePlugin::from_config(config.clone())))
            .insert_resource(TimeUpdateStrategy::ManualDuration(step))
            .insert_resource(OfficeLayout::new(config.world.room_size))
            .insert_resource(stats)
            .insert_resource(TeamMoods::from_starting([("Liam", 80)]))
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Seen>()
            .add_message::<StatsChanged>()
            .add_message::<ToastRequested>()
            .add_message::<GameEndRequested>()
            .add_plugins(MinigamePlugin)
            .add_systems(PostUpdate, collect);
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_max_delta(Duration::from_secs(30));
        app.update();
        app
    }

    fn enter(app: &mut App, phase: OfficePhase) {
        app.world_mut()
            .resource_mut::<NextState<GameScreen>>()
            .set(GameScreen::Office);
        app.world_mut()
            .resource_mut::<NextState<OfficePhase>>()
            .set(phase);
    }

    #[test]
    fn cleanup_timeout_costs_morale_and_intern_mood() {
        let mut app = app(Duration::from_secs(16), CompanyStats::default());
        enter(&mut app, OfficePhase::Cleanup);
        app.update();

        let stats = *app.world().resource::<CompanyStats>();
        assert_eq!(stats.morale, 65);
        assert_eq!(app.world().resource::<TeamMoods>().get("Liam"), Some(70));
        assert!(!app.world().contains_resource::<CleanupRound>());
        assert_eq!(
            app.world().resource::<Seen>().outcomes,
            [MinigameOutcome::Cleanup { cleared: false }]
        );

        app.update();
        assert_eq!(
            *app.world().resource::<State<OfficePhase>>().get(),
            OfficePhase::Roaming
        );
        let trash = app
            .world_mut()
            .query::<&TrashSprite>()
            .iter(app.world())
            .count();
        assert_eq!(trash, 0);
    }

    #[test]
    fn unattended_bugs_can_bankrupt_the_company() {
        let broke = CompanyStats {
            funds: 15_000,
            ..CompanyStats::default()
        };
        let mut app = app(Duration::from_secs(1), broke);
        enter(&mut app, OfficePhase::BugHunt);
        for _ in 0..20 {
            app.update();
        }

        assert_eq!(app.world().resource::<CompanyStats>().funds, 0);
        assert!(!app.world().contains_resource::<BugInvasion>());
        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.endings, [EndReason::Bankrupt]);
        assert_eq!(
            seen.outcomes,
            [MinigameOutcome::BugHunt {
                squashed: 0,
                breached: 5
            }]
        );
    }
}
