// src/ui/notices.rs
//
// Warning panel shown before a minigame. Dismissing it starts the minigame.

use bevy::prelude::*;

use crate::{
    company::stats::format_number,
    core::{config::GameConfig, state::OfficePhase},
    minigame::{MinigameKind, PendingMinigame},
    ui::widgets::{full_screen_column, spawn_button, text, BODY_TEXT_COLOR, PANEL_BORDER_COLOR},
};

const NOTICE_WIDTH: f32 = 500.0;
const NOTICE_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.1, 0.95);
const BUG_TITLE_COLOR: Color = Color::srgb_u8(0xff, 0x66, 0x66);
const CLEANUP_TITLE_COLOR: Color = Color::srgb_u8(0xff, 0xcc, 0x00);

#[derive(Component)]
pub struct NoticeRoot;

#[derive(Component)]
pub struct NoticeOkButton;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeCopy {
    pub title: &'static str,
    pub body: String,
    pub button: &'static str,
}

pub fn notice_copy(kind: MinigameKind, config: &GameConfig) -> NoticeCopy {
    match kind {
        MinigameKind::BugHunt => NoticeCopy {
            title: "Server Room Threat!",
            body: format!(
                "Bugs are trying to enter your server room!\n\
                 Click them before they get inside.\n\
                 Each bug that enters will cost you ${}!",
                format_number(config.minigames.bug_breach_penalty)
            ),
            button: "OK - Let's Go!",
        },
        MinigameKind::Cleanup => NoticeCopy {
            title: "Emergency Office Cleanup!",
            body: format!(
                "{}'s freaking out, trash is everywhere!\n\
                 Click ALL the trash before the timer runs out.\n\
                 Win: + Morale, + {npc} Mood | Lose: - Morale, - {npc} Mood",
                config.minigames.cleanup_npc,
                npc = config.minigames.cleanup_npc
            ),
            button: "OK - Let's Clean!",
        },
    }
}

pub fn minigame_phase(kind: MinigameKind) -> OfficePhase {
    match kind {
        MinigameKind::BugHunt => OfficePhase::BugHunt,
        MinigameKind::Cleanup => OfficePhase::Cleanup,
    }
}

pub fn spawn_notice(
    mut commands: Commands,
    pending: Option<Res<PendingMinigame>>,
    config: Res<GameConfig>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    let Some(pending) = pending else {
        warn!("Notice phase entered without a pending minigame");
        next_phase.set(OfficePhase::Roaming);
        return;
    };
    let copy = notice_copy(pending.0, &config);
    let title_color = match pending.0 {
        MinigameKind::BugHunt => BUG_TITLE_COLOR,
        MinigameKind::Cleanup => CLEANUP_TITLE_COLOR,
    };

    commands
        .spawn((
            full_screen_column(0.0),
            GlobalZIndex(8),
            NoticeRoot,
            Name::new("Minigame Notice"),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        width: Val::Px(NOTICE_WIDTH),
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(NOTICE_BACKGROUND),
                    BorderColor::from(PANEL_BORDER_COLOR),
                ))
                .with_children(|panel| {
                    panel.spawn(text(copy.title, 20.0, title_color));
                    panel.spawn(text(copy.body, 16.0, BODY_TEXT_COLOR));
                    spawn_button(panel, copy.button, 18.0, NoticeOkButton);
                });
        });
}

/// OK button, Enter or Space starts the announced minigame.
pub fn dismiss_notice(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (With<NoticeOkButton>, Changed<Interaction>)>,
    pending: Res<PendingMinigame>,
    mut next_phase: ResMut<NextState<OfficePhase>>,
) {
    let clicked = buttons
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed);
    if !clicked && !keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        return;
    }
    debug!("Starting {:?}", pending.0);
    next_phase.set(minigame_phase(pending.0));
    commands.remove_resource::<PendingMinigame>();
}
