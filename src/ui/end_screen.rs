// src/ui/end_screen.rs
//
// Ending card with the final stats, menu buttons and confetti for good endings.

use bevy::{prelude::*, window::PrimaryWindow};
use rand::Rng;

use crate::{
    company::ending::EndingReport,
    core::{plugin::SimulationClock, state::GameScreen},
    ui::widgets::{full_screen_column, spawn_button, text, BODY_TEXT_COLOR},
};

const END_BACKGROUND: Color = Color::srgb_u8(0x0b, 0x13, 0x2a);
const FULL_CONFETTI: f32 = 120.0;
const CONFETTI_COLORS: [Color; 4] = [
    Color::srgb_u8(0xff, 0x5e, 0x7e),
    Color::srgb_u8(0x5e, 0xff, 0xa1),
    Color::srgb_u8(0x6e, 0xa5, 0xff),
    Color::srgb_u8(0xff, 0xe0, 0x66),
];
const FALLBACK_VIEW: Vec2 = Vec2::new(1280.0, 720.0);

#[derive(Component)]
pub struct EndScreenRoot;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndButton {
    PlayAgain,
    BackToMenu,
}

#[derive(Component, Debug)]
pub struct ConfettiPiece {
    delay: f32,
    speed: f32,
    y: f32,
    floor: f32,
}

pub fn confetti_count(intensity: f32) -> usize {
    (FULL_CONFETTI * intensity.clamp(0.0, 1.0)).floor() as usize
}

/// Area confetti falls over. A missing or collapsed window uses the default size.
pub fn confetti_view(window_size: Option<Vec2>) -> Vec2 {
    match window_size {
        Some(size) if size.x > 0.0 && size.y > 0.0 => size,
        _ => FALLBACK_VIEW,
    }
}

pub fn spawn_end_screen(
    mut commands: Commands,
    report: Option<Res<EndingReport>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(report) = report else {
        warn!("End screen opened without an ending report");
        return;
    };
    let ending = report.ending;

    commands
        .spawn((
            full_screen_column(14.0),
            BackgroundColor(END_BACKGROUND),
            EndScreenRoot,
            Name::new("End Screen"),
        ))
        .with_children(|parent| {
            parent.spawn(text(ending.title(), 48.0, ending.accent()));
            parent.spawn(text(ending.subtitle(), 18.0, BODY_TEXT_COLOR));
            parent.spawn((
                text(report.summary_lines().join("\n"), 18.0, BODY_TEXT_COLOR),
                TextLayout::new_with_justify(Justify::Center),
                Node {
                    margin: UiRect::vertical(Val::Px(24.0)),
                    ..default()
                },
            ));
            spawn_button(parent, "Play Again", 22.0, EndButton::PlayAgain);
            spawn_button(parent, "Back to Menu", 22.0, EndButton::BackToMenu);
        });

    let pieces = confetti_count(ending.confetti_intensity());
    if pieces == 0 {
        return;
    }
    let view = confetti_view(windows.single().ok().map(|window| window.size()));
    let mut rng = rand::thread_rng();
    for _ in 0..pieces {
        let y = -rng.gen_range(0.0..view.y / 2.0);
        commands.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(rng.gen_range(0.0..view.x)),
                top: Val::Px(y),
                width: Val::Px(rng.gen_range(6.0..10.0)),
                height: Val::Px(rng.gen_range(8.0..14.0)),
                ..default()
            },
            BackgroundColor(
                CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())].with_alpha(0.9),
            ),
            GlobalZIndex(30),
            ConfettiPiece {
                delay: rng.gen_range(0.0..0.4),
                speed: (view.y * 1.5) / rng.gen_range(1.2..2.2),
                y,
                floor: view.y + 30.0,
            },
            EndScreenRoot,
        ));
    }
    info!("Confetti: {} pieces", pieces);
}

pub fn fall_confetti(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut pieces: Query<(Entity, &mut ConfettiPiece, &mut Node)>,
) {
    let dt = clock.delta_secs();
    for (entity, mut piece, mut node) in pieces.iter_mut() {
        let mut step = dt;
        if piece.delay > 0.0 {
            piece.delay -= dt;
            if piece.delay > 0.0 {
                continue;
            }
            step = -piece.delay;
            piece.delay = 0.0;
        }
        piece.y += piece.speed * step;
        if piece.y > piece.floor {
            commands.entity(entity).despawn();
            continue;
        }
        node.top = Val::Px(piece.y);
    }
}

pub fn handle_end_buttons(
    buttons: Query<(&Interaction, &EndButton), Changed<Interaction>>,
    mut next_screen: ResMut<NextState<GameScreen>>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            debug!("End screen: {:?}", button);
            next_screen.set(GameScreen::Menu);
        }
    }
}
