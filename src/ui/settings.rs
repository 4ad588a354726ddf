// src/ui/settings.rs
//
// Settings screen: how-to-play text and the player name editor.

use bevy::{
    ecs::message::MessageReader,
    input::{
        keyboard::{Key, KeyboardInput},
        ButtonState,
    },
    prelude::*,
};

use crate::{
    company::session::GameSession,
    core::{config::MAX_PLAYER_NAME_CHARS, state::GameScreen},
    ui::widgets::{
        full_screen_column, spawn_button, spawn_tagged_button, text, BUTTON_TEXT_COLOR,
        OVERLAY_COLOR, PANEL_BORDER_COLOR, PANEL_COLOR,
    },
};

const HOW_TO_PLAY: &str =
    "How to Play:\nManage your funds, keep morale high,\nand finish the product within 12 weeks.";

#[derive(Component)]
pub struct SettingsRoot;

#[derive(Component)]
pub struct NameEditorRoot;

#[derive(Component)]
pub struct NameEditorText;

#[derive(Component)]
pub struct EditNameLabel;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsButton {
    EditName,
    Back,
}

/// In-progress name edit. Present only while the editor is open.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEditor {
    buffer: String,
}

impl NameEditor {
    pub fn new(current: &str) -> Self {
        Self {
            buffer: current.chars().take(MAX_PLAYER_NAME_CHARS).collect(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Appends typed text up to the length limit.
    pub fn push_str(&mut self, typed: &str) {
        for ch in typed.chars().filter(|ch| !ch.is_control()) {
            if self.buffer.chars().count() >= MAX_PLAYER_NAME_CHARS {
                break;
            }
            self.buffer.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// The trimmed name, or `None` when nothing but whitespace was typed.
    pub fn commit(&self) -> Option<String> {
        let trimmed = self.buffer.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn edit_name_label(name: &str) -> String {
    format!("Edit Name: {name}")
}

pub fn spawn_settings(mut commands: Commands, session: Res<GameSession>) {
    commands
        .spawn((full_screen_column(24.0), SettingsRoot, Name::new("Settings")))
        .with_children(|parent| {
            parent.spawn(text("Settings", 48.0, Color::WHITE));
            parent.spawn((
                text(HOW_TO_PLAY, 24.0, BUTTON_TEXT_COLOR),
                TextLayout::new_with_justify(Justify::Center),
            ));
            spawn_tagged_button(
                parent,
                edit_name_label(session.player_name()),
                28.0,
                SettingsButton::EditName,
                EditNameLabel,
            );
            spawn_button(parent, "Back to Menu", 28.0, SettingsButton::Back);
        });
}

pub fn handle_settings_buttons(
    mut commands: Commands,
    buttons: Query<(&Interaction, &SettingsButton), Changed<Interaction>>,
    editor: Option<Res<NameEditor>>,
    session: Res<GameSession>,
    mut next_screen: ResMut<NextState<GameScreen>>,
) {
    if editor.is_some() {
        return;
    }
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            SettingsButton::EditName => {
                let editor = NameEditor::new(session.player_name());
                spawn_name_editor(&mut commands, &editor);
                commands.insert_resource(editor);
            }
            SettingsButton::Back => next_screen.set(GameScreen::Menu),
        }
    }
}

fn spawn_name_editor(commands: &mut Commands, editor: &NameEditor) {
    commands
        .spawn((
            full_screen_column(0.0),
            BackgroundColor(OVERLAY_COLOR),
            GlobalZIndex(10),
            NameEditorRoot,
            SettingsRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        width: Val::Px(520.0),
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(PANEL_COLOR),
                    BorderColor::from(PANEL_BORDER_COLOR),
                ))
                .with_children(|modal| {
                    modal.spawn(text("Edit Player Name", 22.0, BUTTON_TEXT_COLOR));
                    modal.spawn((
                        text(format!("{}_", editor.buffer()), 20.0, Color::WHITE),
                        NameEditorText,
                    ));
                    modal.spawn(text(
                        format!(
                            "Enter saves, Escape cancels. Max length: {MAX_PLAYER_NAME_CHARS} characters"
                        ),
                        12.0,
                        BUTTON_TEXT_COLOR,
                    ));
                });
        });
}

/// Feeds typed keys into the open editor; Enter saves, Escape cancels.
#[allow(clippy::type_complexity)]
pub fn edit_player_name(
    mut commands: Commands,
    mut keys: MessageReader<KeyboardInput>,
    mut editor: ResMut<NameEditor>,
    mut session: ResMut<GameSession>,
    editor_roots: Query<Entity, With<NameEditorRoot>>,
    mut editor_text: Query<&mut Text, With<NameEditorText>>,
    mut labels: Query<&mut Text, (With<EditNameLabel>, Without<NameEditorText>)>,
) {
    let mut close = false;
    for input in keys.read() {
        if input.state != ButtonState::Pressed {
            continue;
        }
        match &input.logical_key {
            Key::Enter => {
                match editor.commit() {
                    Some(name) => {
                        info!("Player name set to '{}'", name);
                        session.set_player_name(name);
                    }
                    None => debug!("Empty player name ignored"),
                }
                close = true;
            }
            Key::Escape => close = true,
            Key::Backspace => editor.backspace(),
            Key::Space => editor.push_str(" "),
            Key::Character(typed) => editor.push_str(typed),
            _ => {}
        }
        if close {
            break;
        }
    }

    if close {
        commands.remove_resource::<NameEditor>();
        for entity in editor_roots.iter() {
            commands.entity(entity).despawn();
        }
        for mut label in labels.iter_mut() {
            label.0 = edit_name_label(session.player_name());
        }
        return;
    }

    if editor.is_changed() {
        for mut shown in editor_text.iter_mut() {
            shown.0 = format!("{}_", editor.buffer());
        }
    }
}

pub fn close_name_editor(mut commands: Commands) {
    commands.remove_resource::<NameEditor>();
}
