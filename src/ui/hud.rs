// src/ui/hud.rs
//
// Office HUD: stats panel with temporary deltas, week counter and the talk prompt.

use bevy::{ecs::message::MessageReader, prelude::*};

use crate::{
    company::{
        events::StatsChanged,
        session::GameSession,
        stats::{format_delta, format_number, CompanyStats, StatEffects},
    },
    core::{config::GameConfig, plugin::SimulationClock, state::OfficePhase},
    player::{components::PlayerInteractionState, systems::talk_prompt_visible},
    ui::{
        menu::GAME_TITLE,
        widgets::{text, BODY_TEXT_COLOR, BUTTON_TEXT_COLOR},
    },
};

const HUD_BACKGROUND: Color = Color::srgba(0.08, 0.11, 0.22, 0.75);
const TALK_PROMPT: &str = "Press E to talk";

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudStatsText;

#[derive(Component)]
pub struct WeekCounterText;

#[derive(Component)]
pub struct TalkPromptText;

/// Deltas from the latest stat change, shown until the timer runs out.
#[derive(Resource, Debug, Default)]
pub struct HudDeltas {
    shown: Option<(StatEffects, Timer)>,
}

impl HudDeltas {
    pub fn show(&mut self, effects: StatEffects, seconds: f32) {
        self.shown = Some((effects, Timer::from_seconds(seconds, TimerMode::Once)));
    }

    pub fn current(&self) -> Option<&StatEffects> {
        self.shown.as_ref().map(|(effects, _)| effects)
    }

    /// Returns true when the deltas just expired.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        let expired = match self.shown.as_mut() {
            Some((_, timer)) => timer.tick(delta).just_finished(),
            None => false,
        };
        if expired {
            self.shown = None;
        }
        expired
    }
}

/// The four stat lines, with deltas appended when present.
pub fn stat_lines(stats: &CompanyStats, deltas: Option<&StatEffects>) -> [String; 4] {
    let d = deltas.copied().unwrap_or_default();
    [
        format!("Funds: ${}{}", format_number(stats.funds), format_delta(d.funds)),
        format!("Product: {}%{}", stats.product, format_delta(d.product.into())),
        format!("Morale: {}%{}", stats.morale, format_delta(d.morale.into())),
        format!("Hype: {}%{}", stats.hype, format_delta(d.hype.into())),
    ]
}

pub fn week_label(session: &GameSession) -> String {
    format!("Week {}/{}", session.week(), session.weeks_total())
}

pub fn spawn_hud(
    mut commands: Commands,
    stats: Res<CompanyStats>,
    session: Res<GameSession>,
    mut deltas: ResMut<HudDeltas>,
) {
    *deltas = HudDeltas::default();

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            padding: UiRect::all(Val::Px(10.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        },
        BackgroundColor(HUD_BACKGROUND),
        HudRoot,
        Name::new("HUD Stats"),
        children![
            text(GAME_TITLE, 18.0, Color::WHITE),
            (
                text(stat_lines(&stats, None).join("\n"), 16.0, BODY_TEXT_COLOR),
                HudStatsText,
            ),
        ],
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(16.0),
            padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(HUD_BACKGROUND),
        HudRoot,
        children![(text(week_label(&session), 16.0, Color::WHITE), WeekCounterText)],
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(52.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        HudRoot,
        children![(
            text(TALK_PROMPT, 16.0, BUTTON_TEXT_COLOR),
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(HUD_BACKGROUND),
            Visibility::Hidden,
            TalkPromptText,
        )],
    ));
}

/// Records deltas for every stat change and redraws the stats panel.
pub fn update_hud_stats(
    mut changes: MessageReader<StatsChanged>,
    clock: Res<SimulationClock>,
    config: Res<GameConfig>,
    stats: Res<CompanyStats>,
    mut deltas: ResMut<HudDeltas>,
    mut stats_text: Query<&mut Text, With<HudStatsText>>,
) {
    let mut first_previous = None;
    for change in changes.read() {
        first_previous.get_or_insert(change.previous);
    }
    let mut redraw = stats.is_changed();
    if let Some(previous) = first_previous {
        deltas.show(stats.delta_since(&previous), config.timing.hud_delta_seconds);
        redraw = true;
    }
    if deltas.tick(clock.delta()) {
        redraw = true;
    }
    if !redraw {
        return;
    }

    let lines = stat_lines(&stats, deltas.current()).join("\n");
    for mut shown in stats_text.iter_mut() {
        shown.0.clone_from(&lines);
    }
}

pub fn update_week_counter(
    session: Res<GameSession>,
    mut counter: Query<&mut Text, With<WeekCounterText>>,
) {
    if !session.is_changed() {
        return;
    }
    let label = week_label(&session);
    for mut shown in counter.iter_mut() {
        if shown.0 != label {
            shown.0.clone_from(&label);
        }
    }
}

pub fn update_talk_prompt(
    phase: Res<State<OfficePhase>>,
    interaction: Res<PlayerInteractionState>,
    session: Res<GameSession>,
    mut prompt: Query<&mut Visibility, With<TalkPromptText>>,
) {
    let visible =
        *phase.get() == OfficePhase::Roaming && talk_prompt_visible(&interaction, &session);
    let wanted = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in prompt.iter_mut() {
        visibility.set_if_neq(wanted);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn stat_lines_show_percentages_and_deltas() {
        let stats = CompanyStats {
            funds: 46_000,
            product: 32,
            morale: 72,
            hype: 10,
        };
        assert_eq!(
            stat_lines(&stats, None),
            [
                "Funds: $46,000".to_string(),
                "Product: 32%".to_string(),
                "Morale: 72%".to_string(),
                "Hype: 10%".to_string(),
            ]
        );

        let effects = StatEffects {
            funds: -4_000,
            product: 12,
            morale: 2,
            hype: 0,
        };
        let lines = stat_lines(&stats, Some(&effects));
        assert_eq!(lines[0], "Funds: $46,000  (-4,000)");
        assert_eq!(lines[1], "Product: 32%  (+12)");
        assert_eq!(lines[3], "Hype: 10%");
    }

    #[test]
    fn deltas_expire_after_their_timer() {
        let mut deltas = HudDeltas::default();
        deltas.show(StatEffects::morale(5), 3.0);
        assert!(!deltas.tick(Duration::from_secs(2)));
        assert!(deltas.current().is_some());
        assert!(deltas.tick(Duration::from_secs(2)));
        assert!(deltas.current().is_none());
    }
}
