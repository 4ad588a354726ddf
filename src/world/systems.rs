//! Systems for the world module.
use bevy::{ecs::system::EntityCommands, math::Rect, prelude::*, window::PrimaryWindow};

use crate::world::{
    components::{MainCamera, OfficeEntity, Solid},
    layout::{OfficeLayout, PieceKind},
};

pub const FLOOR_Z: f32 = 0.0;
pub const ROOM_FLOOR_Z: f32 = 0.5;
pub const FURNITURE_Z: f32 = 2.0;
pub const LABEL_Z: f32 = 8.0;

const FLOOR_COLOR: &str = "1a2033";
const CEO_FLOOR_COLOR: &str = "2a2418";
const SERVER_FLOOR_COLOR: &str = "111a2e";
const WALL_COLOR: &str = "05060a";
const DESK_COLOR: &str = "6b4a2b";
const CHAIR_COLOR: &str = "3a3a46";
const RACK_COLOR: &str = "2b3550";
const CEO_LABEL_COLOR: &str = "ffd27f";
const SERVER_LABEL_COLOR: &str = "a8c8ff";
const LABEL_INSET: Vec2 = Vec2::new(60.0, 24.0);

pub fn hex(color: &str) -> Color {
    Srgba::hex(color).map(Color::from).unwrap_or(Color::WHITE)
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera, Name::new("Main Camera")));
}

/// Builds the floor, side rooms, walls and furniture as flat rectangles.
pub fn spawn_office(mut commands: Commands, layout: Res<OfficeLayout>) {
    commands.spawn((
        Sprite::from_color(hex(FLOOR_COLOR), layout.size()),
        Transform::from_xyz(0.0, 0.0, FLOOR_Z),
        OfficeEntity,
        Name::new("Office Floor"),
    ));

    for (room, color, label, label_color) in [
        (layout.ceo_office(), CEO_FLOOR_COLOR, "CEO Office", CEO_LABEL_COLOR),
        (
            layout.server_room(),
            SERVER_FLOOR_COLOR,
            "Server Room",
            SERVER_LABEL_COLOR,
        ),
    ] {
        spawn_rect(&mut commands, &layout, room, hex(color), ROOM_FLOOR_Z)
            .insert(Name::new(format!("{} Floor", label)));

        let label_at = layout.to_world(room.min + LABEL_INSET);
        commands.spawn((
            Text2d::new(label),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(hex(label_color)),
            Transform::from_translation(label_at.extend(LABEL_Z)),
            OfficeEntity,
        ));
    }

    let mut solids = 0;
    for piece in layout.pieces() {
        let color = match piece.kind {
            PieceKind::Wall => WALL_COLOR,
            PieceKind::Desk => DESK_COLOR,
            PieceKind::Chair => CHAIR_COLOR,
            PieceKind::Rack => RACK_COLOR,
        };
        spawn_rect(&mut commands, &layout, piece.rect, hex(color), FURNITURE_Z).insert((
            Solid {
                bounds: layout.rect_to_world(piece.collider),
            },
            Name::new(format!("{:?}", piece.kind)),
        ));
        solids += 1;
    }

    info!(
        "Office spawned ({}x{}, {} solid pieces)",
        layout.size().x,
        layout.size().y,
        solids
    );
}

fn spawn_rect<'a>(
    commands: &'a mut Commands,
    layout: &OfficeLayout,
    rect: Rect,
    color: Color,
    z: f32,
) -> EntityCommands<'a> {
    let world = layout.rect_to_world(rect);
    commands.spawn((
        Sprite::from_color(color, world.size()),
        Transform::from_translation(world.center().extend(z)),
        OfficeEntity,
    ))
}

pub fn despawn_office(mut commands: Commands, query: Query<Entity, With<OfficeEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Cursor position in office pixels, if the cursor is over the window.
pub fn cursor_office_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    layout: &OfficeLayout,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;
    Some(layout.to_office(world))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::state::GameScreen, world::WorldPlugin};
    use bevy::state::app::StatesPlugin;

    #[test]
    fn office_spawns_on_enter_and_clears_on_exit() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameScreen>()
            .add_plugins(WorldPlugin);
        app.update();

        app.world_mut()
            .resource_mut::<NextState<GameScreen>>()
            .set(GameScreen::Office);
        app.update();

        let solids = app
            .world_mut()
            .query::<&Solid>()
            .iter(app.world())
            .count();
        assert_eq!(solids, 17);

        app.world_mut()
            .resource_mut::<NextState<GameScreen>>()
            .set(GameScreen::Menu);
        app.update();

        let leftovers = app
            .world_mut()
            .query_filtered::<Entity, With<OfficeEntity>>()
            .iter(app.world())
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn invalid_hex_falls_back_to_white() {
        assert_eq!(hex("not-a-color"), Color::WHITE);
    }
}
