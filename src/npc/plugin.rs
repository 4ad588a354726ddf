//! NPC plugin wiring roster content, spawning and mood bars.
use bevy::prelude::*;

use crate::{
    company::team::TeamMoods,
    core::state::GameScreen,
    npc::{
        roster::Roster,
        systems::{spawn_npcs, update_mood_bars},
    },
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        let roster = Roster::load_or_default();
        info!(
            "Roster loaded: {} NPCs, {} founders",
            roster.npcs.len(),
            roster.founders.len()
        );

        app.insert_resource(roster.npcs)
            .insert_resource(roster.founders)
            .add_systems(OnEnter(GameScreen::Office), spawn_npcs)
            .add_systems(
                Update,
                update_mood_bars
                    .run_if(in_state(GameScreen::Office).and(resource_changed::<TeamMoods>)),
            );
    }
}
