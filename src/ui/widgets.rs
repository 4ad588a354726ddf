// src/ui/widgets.rs
//
// Shared palette, text and button helpers for every screen.

use bevy::prelude::*;

pub const BACKDROP_COLOR: Color = Color::srgb_u8(0x0e, 0x10, 0x18);
pub const PANEL_COLOR: Color = Color::srgba(0.043, 0.075, 0.165, 0.95);
pub const PANEL_BORDER_COLOR: Color = Color::srgb_u8(0x2c, 0x39, 0x66);
pub const BUTTON_COLOR: Color = Color::srgb_u8(0x1b, 0x23, 0x40);
pub const BUTTON_HOVER_COLOR: Color = Color::srgb_u8(0x2c, 0x39, 0x66);
pub const BUTTON_TEXT_COLOR: Color = Color::srgb_u8(0xcf, 0xe0, 0xff);
pub const BODY_TEXT_COLOR: Color = Color::srgb_u8(0xe8, 0xf0, 0xff);
pub const OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

pub fn text(content: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(content),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

/// Node covering the whole window, centering its children in a column.
pub fn full_screen_column(row_gap: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(row_gap),
        ..default()
    }
}

/// Spawns a menu-style button carrying `action` so screen systems can match clicks.
pub fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    label: impl Into<String>,
    font_size: f32,
    action: impl Bundle,
) -> Entity {
    spawn_tagged_button(parent, label, font_size, action, ())
}

/// Like [`spawn_button`], with `label_tag` added to the label text entity.
pub fn spawn_tagged_button(
    parent: &mut ChildSpawnerCommands,
    label: impl Into<String>,
    font_size: f32,
    action: impl Bundle,
    label_tag: impl Bundle,
) -> Entity {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            action,
        ))
        .with_children(|button| {
            button.spawn((text(label, font_size, BUTTON_TEXT_COLOR), label_tag));
        })
        .id()
}

/// Hover highlight shared by all buttons.
#[allow(clippy::type_complexity)]
pub fn update_button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER_COLOR,
            Interaction::None => BUTTON_COLOR,
        };
    }
}

/// Despawns every root entity tagged with `T`.
pub fn despawn_with<T: Component>(mut commands: Commands, roots: Query<Entity, With<T>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
}
