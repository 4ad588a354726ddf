use std::path::Path;

use bevy::{prelude::*, window::WindowResolution};

mod company;
mod core;
mod dialogue;
mod minigame;
mod npc;
mod player;
mod ui;
mod world;

use crate::{
    company::CompanyPlugin, core::CorePlugin, dialogue::DialoguePlugin, minigame::MinigamePlugin,
    npc::NpcPlugin, player::PlayerPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    load_local_env();

    App::new()
        .insert_resource(ClearColor(ui::widgets::BACKDROP_COLOR))
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Startup Sprint".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin::default(), // First: later plugins read GameConfig while building
            WorldPlugin,
            NpcPlugin,
            CompanyPlugin,
            MinigamePlugin,
            DialoguePlugin,
            PlayerPlugin,
            UiPlugin,
        ))
        .run();
}

fn load_local_env() {
    const ENV_FILE: &str = "startup_sprint.env";

    let path = Path::new(ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", ENV_FILE, err);
    }
}
