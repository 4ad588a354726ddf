// src/ui/founder_panel.rs
//
// Founder visit: dimmed office, the founder's tip and a Continue button.

use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::{
    dialogue::{events::FounderVisitDismissed, founders::FounderVisitLine},
    ui::widgets::{spawn_button, text, BODY_TEXT_COLOR, PANEL_BORDER_COLOR, PANEL_COLOR},
};

#[derive(Component)]
pub struct FounderPanelRoot;

#[derive(Component)]
pub struct FounderContinueButton;

pub fn spawn_founder_panel(mut commands: Commands, line: Res<FounderVisitLine>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                padding: UiRect::new(Val::Px(50.0), Val::Px(50.0), Val::ZERO, Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(0.5)),
            GlobalZIndex(7),
            FounderPanelRoot,
            Name::new("Founder Visit"),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        min_height: Val::Px(150.0),
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::SpaceBetween,
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(PANEL_COLOR),
                    BorderColor::from(PANEL_BORDER_COLOR),
                ))
                .with_children(|panel| {
                    panel.spawn(text(line.text.clone(), 18.0, BODY_TEXT_COLOR));
                    panel
                        .spawn(Node {
                            justify_content: JustifyContent::FlexEnd,
                            ..default()
                        })
                        .with_children(|row| {
                            spawn_button(row, "Continue", 18.0, FounderContinueButton);
                        });
                });
        });
}

pub fn founder_panel_clicks(
    buttons: Query<&Interaction, (With<FounderContinueButton>, Changed<Interaction>)>,
    mut dismissed: MessageWriter<FounderVisitDismissed>,
) {
    if buttons
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        dismissed.write(FounderVisitDismissed);
    }
}
