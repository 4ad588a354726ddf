// src/ui/dialogue_box.rs
//
// Bottom dialogue panel: typewriter text, advance hint and the two choice cards.

use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::{
    core::plugin::SimulationClock,
    dialogue::{
        conversation::{Conversation, ConversationStage},
        events::ConversationInput,
    },
    ui::widgets::{
        text, BODY_TEXT_COLOR, BUTTON_COLOR, BUTTON_TEXT_COLOR, PANEL_BORDER_COLOR, PANEL_COLOR,
    },
};

const PANEL_HEIGHT: f32 = 180.0;
const PANEL_MARGIN: f32 = 20.0;
const PULSE_SECONDS: f32 = 0.15;
const PULSE_BORDER_COLOR: Color = Color::srgb(1.0, 0.82, 0.5);
const ADVANCE_HINT: &str = "E / Space to continue";
const CHOOSE_HINT: &str = "Press 1 or 2 to choose";

#[derive(Component)]
pub struct DialogueBoxRoot;

/// Clickable text area; a click advances like E / Space.
#[derive(Component)]
pub struct DialogueTextArea;

#[derive(Component)]
pub struct DialogueBodyText;

#[derive(Component)]
pub struct DialogueHintText;

#[derive(Component)]
pub struct ChoiceRow;

#[derive(Component, Debug)]
pub struct ChoiceCard {
    pub index: usize,
}

/// Flash on the choice cards when the player presses advance while choosing.
#[derive(Resource, Debug)]
pub struct ChoicePulse {
    seen: u32,
    timer: Timer,
}

impl Default for ChoicePulse {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(PULSE_SECONDS, TimerMode::Once);
        timer.tick(timer.duration());
        Self { seen: 0, timer }
    }
}

pub fn choice_card_label(index: usize, label: &str) -> String {
    format!("{}. {}", index + 1, label)
}

pub fn spawn_dialogue_box(mut commands: Commands, conversation: Res<Conversation>) {
    commands.insert_resource(ChoicePulse::default());

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PANEL_MARGIN),
                right: Val::Px(PANEL_MARGIN),
                bottom: Val::Px(PANEL_MARGIN),
                min_height: Val::Px(PANEL_HEIGHT),
                padding: UiRect::all(Val::Px(16.0)),
                border: UiRect::all(Val::Px(2.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(PANEL_BORDER_COLOR),
            GlobalZIndex(5),
            DialogueBoxRoot,
            Name::new("Dialogue Box"),
        ))
        .with_children(|panel| {
            panel
                .spawn((
                    Node {
                        flex_grow: 1.0,
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(6.0),
                        ..default()
                    },
                    Interaction::default(),
                    DialogueTextArea,
                ))
                .with_children(|area| {
                    area.spawn((text("", 18.0, BODY_TEXT_COLOR), DialogueBodyText));
                    area.spawn((text(ADVANCE_HINT, 12.0, BUTTON_TEXT_COLOR), DialogueHintText));
                });

            panel
                .spawn((
                    Node {
                        column_gap: Val::Px(12.0),
                        ..default()
                    },
                    Visibility::Hidden,
                    ChoiceRow,
                ))
                .with_children(|row| {
                    for (index, choice) in conversation.choices().iter().enumerate() {
                        row.spawn((
                            Button,
                            Node {
                                flex_grow: 1.0,
                                padding: UiRect::all(Val::Px(10.0)),
                                border: UiRect::all(Val::Px(2.0)),
                                ..default()
                            },
                            BackgroundColor(BUTTON_COLOR),
                            BorderColor::from(PANEL_BORDER_COLOR),
                            ChoiceCard { index },
                        ))
                        .with_children(|card| {
                            card.spawn(text(
                                choice_card_label(index, &choice.label),
                                16.0,
                                Color::WHITE,
                            ));
                        });
                    }
                });
        });
}

#[allow(clippy::type_complexity)]
pub fn sync_dialogue_box(
    conversation: Res<Conversation>,
    mut body: Query<&mut Text, (With<DialogueBodyText>, Without<DialogueHintText>)>,
    mut hint: Query<&mut Text, (With<DialogueHintText>, Without<DialogueBodyText>)>,
    mut row: Query<&mut Visibility, With<ChoiceRow>>,
) {
    if !conversation.is_changed() {
        return;
    }

    for mut shown in body.iter_mut() {
        if shown.0 != conversation.visible_text() {
            shown.0 = conversation.visible_text().to_string();
        }
    }

    let choosing = conversation.stage() == ConversationStage::Choosing;
    let hint_text = if choosing { CHOOSE_HINT } else { ADVANCE_HINT };
    for mut shown in hint.iter_mut() {
        if shown.0 != hint_text {
            shown.0 = hint_text.to_string();
        }
    }

    let wanted = if choosing {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in row.iter_mut() {
        visibility.set_if_neq(wanted);
    }
}

pub fn dialogue_box_clicks(
    areas: Query<&Interaction, (With<DialogueTextArea>, Changed<Interaction>)>,
    cards: Query<(&Interaction, &ChoiceCard), Changed<Interaction>>,
    mut inputs: MessageWriter<ConversationInput>,
) {
    if areas.iter().any(|interaction| *interaction == Interaction::Pressed) {
        inputs.write(ConversationInput::Advance);
    }
    for (interaction, card) in cards.iter() {
        if *interaction == Interaction::Pressed {
            inputs.write(ConversationInput::Choose(card.index));
        }
    }
}

pub fn pulse_choice_cards(
    conversation: Res<Conversation>,
    clock: Res<SimulationClock>,
    mut pulse: ResMut<ChoicePulse>,
    mut cards: Query<&mut BorderColor, With<ChoiceCard>>,
) {
    if conversation.pulses() > pulse.seen {
        pulse.seen = conversation.pulses();
        pulse.timer.reset();
    }
    if pulse.timer.is_finished() {
        return;
    }
    pulse.timer.tick(clock.delta());

    let color = if pulse.timer.is_finished() {
        PANEL_BORDER_COLOR
    } else {
        PULSE_BORDER_COLOR
    };
    for mut border in cards.iter_mut() {
        *border = BorderColor::from(color);
    }
}

pub fn close_dialogue_box(mut commands: Commands) {
    commands.remove_resource::<ChoicePulse>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_are_numbered_from_one() {
        assert_eq!(choice_card_label(0, "Ship it"), "1. Ship it");
        assert_eq!(choice_card_label(1, "Wait"), "2. Wait");
    }

    #[test]
    fn pulse_starts_idle() {
        let pulse = ChoicePulse::default();
        assert!(pulse.timer.is_finished());
        assert_eq!(pulse.seen, 0);
    }
}
