//! Systems driving the bug hunt and the cleanup.
use bevy::{ecs::message::MessageWriter, prelude::*, window::PrimaryWindow};

use crate::{
    company::{
        ending::EndReason,
        events::{GameEndRequested, StatsChanged, ToastRequested},
        stats::{CompanyStats, StatEffects},
        systems::apply_stat_effects,
        team::TeamMoods,
    },
    core::{config::GameConfig, plugin::SimulationClock, state::OfficePhase},
    minigame::{
        bug_hunt::{BugInvasion, BugState},
        cleanup::{CleanupResult, CleanupRound},
        components::{BugSprite, CleanupCountdown, MinigameEntity, TrashSprite},
        MinigameFinished, MinigameOutcome,
    },
    world::{
        components::MainCamera,
        layout::OfficeLayout,
        systems::{cursor_office_position, hex},
    },
};

const BUG_Z: f32 = 9.0;
const TRASH_Z: f32 = 3.0;
const BUG_SIZE: Vec2 = Vec2::new(18.0, 14.0);
const TRASH_SIZE: Vec2 = Vec2::new(22.0, 22.0);
const BUG_COLOR: &str = "d94a4a";
const TRASH_COLOR: &str = "8a6d3b";
const BUG_HUNT_OVER_SECONDS: f32 = 1.5;
const CLEANUP_RESULT_SECONDS: f32 = 2.0;

pub fn start_bug_hunt(mut commands: Commands, layout: Res<OfficeLayout>, config: Res<GameConfig>) {
    let door = layout.server_door_point();
    info!(
        "Bug invasion started: {} bugs heading for the server room at ({:.0}, {:.0})",
        config.minigames.bug_count, door.x, door.y
    );
    commands.insert_resource(BugInvasion::new(door, &config.minigames));
}

/// Spawns, moves and breaches bugs, and finishes the hunt once all are resolved.
#[allow(clippy::too_many_arguments)]
pub fn run_bug_hunt(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    layout: Res<OfficeLayout>,
    mut invasion: ResMut<BugInvasion>,
    mut stats: ResMut<CompanyStats>,
    mut sprites: Query<(Entity, &BugSprite, &mut Transform)>,
    mut stat_changes: MessageWriter<StatsChanged>,
    mut toasts: MessageWriter<ToastRequested>,
    mut finished: MessageWriter<MinigameFinished>,
    mut game_end: MessageWriter<GameEndRequested>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    let tick = invasion.tick(clock.delta(), &mut rand::thread_rng());

    for id in tick.spawned {
        let Some(bug) = invasion.bug(id) else {
            continue;
        };
        commands.spawn((
            Sprite::from_color(hex(BUG_COLOR), BUG_SIZE),
            Transform::from_translation(layout.to_world(bug.position).extend(BUG_Z)),
            BugSprite { id },
            MinigameEntity,
        ));
    }

    if !tick.breached.is_empty() {
        let penalty = invasion.breach_penalty() * tick.breached.len() as i64;
        apply_stat_effects(&mut stats, &StatEffects::funds(-penalty), &mut stat_changes);
        info!(
            "{} bug(s) reached the servers: -${}",
            tick.breached.len(),
            penalty
        );
    }

    for (entity, sprite, mut transform) in sprites.iter_mut() {
        match invasion.bug(sprite.id) {
            Some(bug) if bug.state == BugState::Crawling => {
                let world = layout.to_world(bug.position);
                transform.translation.x = world.x;
                transform.translation.y = world.y;
            }
            _ => commands.entity(entity).despawn(),
        }
    }

    if !invasion.is_over() {
        return;
    }

    let outcome = MinigameOutcome::BugHunt {
        squashed: invasion.squashed(),
        breached: invasion.breached(),
    };
    info!("Bug invasion over: {:?}", outcome);
    toasts.write(ToastRequested::new("Bug invasion over!", BUG_HUNT_OVER_SECONDS));
    finished.write(MinigameFinished { outcome });
    commands.remove_resource::<BugInvasion>();

    if stats.is_bankrupt() {
        game_end.write(GameEndRequested {
            reason: EndReason::Bankrupt,
        });
    } else {
        next_phase.set(OfficePhase::Roaming);
    }
}

pub fn squash_clicked_bugs(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    layout: Res<OfficeLayout>,
    mut invasion: ResMut<BugInvasion>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(point) = cursor_office_position(&windows, &cameras, &layout) else {
        return;
    };
    match invasion.squash_at(point) {
        Some(id) => debug!("Squashed bug {}", id),
        None => debug!("Missed at ({:.0}, {:.0})", point.x, point.y),
    }
}

pub fn start_cleanup(mut commands: Commands, layout: Res<OfficeLayout>, config: Res<GameConfig>) {
    let round = CleanupRound::new(
        layout.size(),
        &config.minigames,
        &mut rand::thread_rng(),
    );

    for item in round.items() {
        commands.spawn((
            Sprite::from_color(hex(TRASH_COLOR), TRASH_SIZE),
            Transform::from_translation(layout.to_world(item.position).extend(TRASH_Z)),
            TrashSprite { id: item.id },
            MinigameEntity,
        ));
    }

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(64.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        MinigameEntity,
        Name::new("Cleanup Countdown"),
    ))
    .with_children(|parent| {
        parent.spawn((
            Text::new(countdown_line(&round)),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(hex("ffe066")),
            CleanupCountdown,
        ));
    });

    info!(
        "Office cleanup started: {} items, {:.0}s",
        round.remaining(),
        round.seconds_left()
    );
    commands.insert_resource(round);
}

fn countdown_line(round: &CleanupRound) -> String {
    format!(
        "Clean up the office! {} left - {:.0}s",
        round.remaining(),
        round.seconds_left().ceil()
    )
}

/// Collects clicked trash, ticks the countdown and pays out the result.
#[allow(clippy::too_many_arguments)]
pub fn run_cleanup(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    clock: Res<SimulationClock>,
    layout: Res<OfficeLayout>,
    config: Res<GameConfig>,
    mut round: ResMut<CleanupRound>,
    mut stats: ResMut<CompanyStats>,
    mut moods: ResMut<TeamMoods>,
    trash: Query<(Entity, &TrashSprite)>,
    mut countdown: Query<&mut Text, With<CleanupCountdown>>,
    mut stat_changes: MessageWriter<StatsChanged>,
    mut toasts: MessageWriter<ToastRequested>,
    mut finished: MessageWriter<MinigameFinished>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    let mut result = None;

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(point) = cursor_office_position(&windows, &cameras, &layout) {
            if let Some((id, outcome)) = round.collect_at(point) {
                for (entity, sprite) in trash.iter() {
                    if sprite.id == id {
                        commands.entity(entity).despawn();
                    }
                }
                result = outcome;
            }
        }
    }

    if result.is_none() {
        result = round.tick(clock.delta());
    }

    if let Ok(mut text) = countdown.single_mut() {
        *text = Text::new(countdown_line(&round));
    }

    let Some(result) = result else {
        return;
    };

    let npc = config.minigames.cleanup_npc.as_str();
    apply_stat_effects(&mut stats, &result.stat_effects(), &mut stat_changes);
    match moods.adjust(npc, result.mood_delta()) {
        Some(mood) => info!("Cleanup {:?}: {} mood now {}", result, npc, mood),
        None => warn!("Cleanup {:?}: no mood tracked for {}", result, npc),
    }

    toasts.write(ToastRequested::new(result.message(), CLEANUP_RESULT_SECONDS));
    finished.write(MinigameFinished {
        outcome: MinigameOutcome::Cleanup {
            cleared: result == CleanupResult::Won,
        },
    });
    commands.remove_resource::<CleanupRound>();
    next_phase.set(OfficePhase::Roaming);
}

pub fn despawn_minigame_entities(
    mut commands: Commands,
    query: Query<Entity, With<MinigameEntity>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<BugInvasion>();
    commands.remove_resource::<CleanupRound>();
}
