//! Player plugin wiring movement and interaction systems.
use bevy::prelude::*;

use crate::{
    core::state::{GameScreen, OfficePhase},
    player::{
        components::PlayerInteractionState,
        systems::{
            clear_interaction_state, detect_nearby_npcs, handle_player_interaction_input,
            leave_to_menu, move_player, movement_allowed, spawn_player,
        },
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInteractionState>()
            .add_systems(OnEnter(GameScreen::Office), spawn_player)
            .add_systems(OnExit(GameScreen::Office), clear_interaction_state)
            .add_systems(
                Update,
                (
                    move_player.run_if(movement_allowed),
                    detect_nearby_npcs,
                    (handle_player_interaction_input, leave_to_menu)
                        .run_if(in_state(OfficePhase::Roaming)),
                )
                    .chain()
                    .run_if(in_state(GameScreen::Office)),
            );
    }
}
