//! WorldPlugin owns the camera, the office floor plan and its scene.
use bevy::prelude::*;

use crate::{
    core::{config::GameConfig, state::GameScreen},
    world::{
        layout::OfficeLayout,
        systems::{despawn_office, spawn_camera, spawn_office},
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let room_size = app
            .world()
            .get_resource::<GameConfig>()
            .map(|config| config.world.room_size)
            .unwrap_or_else(|| GameConfig::default().world.room_size);
        info!("Office configured: {}x{} px", room_size.x, room_size.y);

        app.insert_resource(OfficeLayout::new(room_size))
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(GameScreen::Office), spawn_office)
            .add_systems(OnExit(GameScreen::Office), despawn_office);
    }
}
