// src/ui/menu.rs
//
// Title screen with Continue / Start New Game / Settings / Credits.

use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::{
    company::{events::SessionStartRequested, session::GameSession},
    core::state::GameScreen,
    dialogue::founders::FounderRoster,
    ui::widgets::{full_screen_column, spawn_button, text, BUTTON_TEXT_COLOR, OVERLAY_COLOR},
};

pub const GAME_TITLE: &str = "Startup Sprint";
pub const GAME_SUBTITLE: &str = "A 2D Humorous YC Founder Simulator";

#[derive(Component)]
pub struct MenuRoot;

#[derive(Component)]
pub struct CreditsOverlay;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Continue,
    NewGame,
    Settings,
    Credits,
}

impl MenuButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::NewGame => "Start New Game",
            Self::Settings => "Settings",
            Self::Credits => "Credits",
        }
    }
}

/// Continue only shows when a paused run exists.
pub fn menu_buttons(has_save: bool) -> Vec<MenuButton> {
    let mut buttons = Vec::with_capacity(4);
    if has_save {
        buttons.push(MenuButton::Continue);
    }
    buttons.extend([MenuButton::NewGame, MenuButton::Settings, MenuButton::Credits]);
    buttons
}

pub fn credits_text<'a>(founders: impl Iterator<Item = &'a str>) -> String {
    let mut credits =
        format!("{GAME_TITLE}\nCreated by: You\nMade with Bevy\n\nSpecial Thanks to Founders:");
    for name in founders {
        credits.push_str("\n- ");
        credits.push_str(name);
    }
    credits
}

pub fn spawn_menu(mut commands: Commands, session: Res<GameSession>) {
    commands
        .spawn((full_screen_column(18.0), MenuRoot, Name::new("Main Menu")))
        .with_children(|parent| {
            parent.spawn(text(GAME_TITLE, 52.0, Color::WHITE));
            parent.spawn((
                text(GAME_SUBTITLE, 20.0, BUTTON_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));
            for button in menu_buttons(session.has_save()) {
                spawn_button(parent, button.label(), 28.0, button);
            }
        });
}

pub fn handle_menu_buttons(
    mut commands: Commands,
    buttons: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    founders: Res<FounderRoster>,
    mut start: MessageWriter<SessionStartRequested>,
    mut next_screen: ResMut<NextState<GameScreen>>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Continue => {
                start.write(SessionStartRequested { fresh: false });
            }
            MenuButton::NewGame => {
                start.write(SessionStartRequested { fresh: true });
            }
            MenuButton::Settings => next_screen.set(GameScreen::Settings),
            MenuButton::Credits => {
                commands
                    .spawn((
                        full_screen_column(0.0),
                        BackgroundColor(OVERLAY_COLOR),
                        GlobalZIndex(10),
                        Interaction::default(),
                        CreditsOverlay,
                        MenuRoot,
                    ))
                    .with_children(|overlay| {
                        overlay.spawn((
                            text(credits_text(founders.names()), 22.0, Color::WHITE),
                            TextLayout::new_with_justify(Justify::Center),
                        ));
                    });
            }
        }
    }
}

/// Clicking anywhere on the credits closes them.
pub fn dismiss_credits(
    mut commands: Commands,
    overlays: Query<(Entity, &Interaction), (With<CreditsOverlay>, Changed<Interaction>)>,
) {
    for (entity, interaction) in overlays.iter() {
        if *interaction == Interaction::Pressed {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_needs_a_save() {
        assert_eq!(
            menu_buttons(false),
            [MenuButton::NewGame, MenuButton::Settings, MenuButton::Credits]
        );
        assert_eq!(menu_buttons(true)[0], MenuButton::Continue);
        assert_eq!(menu_buttons(true).len(), 4);
    }

    #[test]
    fn credits_thank_every_founder() {
        let credits = credits_text(["Garry Tan", "Paul Graham"].into_iter());
        assert!(credits.starts_with("Startup Sprint\n"));
        assert!(credits.ends_with("Special Thanks to Founders:\n- Garry Tan\n- Paul Graham"));
    }
}
