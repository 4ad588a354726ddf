//! Systems for player movement and interaction with NPCs.
use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::{
    company::session::GameSession,
    core::{
        config::GameConfig,
        plugin::SimulationClock,
        state::{GameScreen, OfficePhase},
    },
    dialogue::events::TalkRequested,
    npc::components::{InteractionZone, Npc},
    player::components::{NearbyNpcInfo, Player, PlayerInteractionState, PlayerNameTag},
    world::{
        components::{OfficeEntity, Solid},
        layout::OfficeLayout,
        systems::hex,
    },
};

pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 32.0);
const PLAYER_Z: f32 = 6.0;
const NAME_TAG_OFFSET: f32 = 40.0;

/// Run condition: the current office phase lets the player walk.
pub fn movement_allowed(phase: Option<Res<State<OfficePhase>>>) -> bool {
    phase.is_some_and(|phase| phase.get().allows_movement())
}

/// Unit direction from WASD and arrow keys.
pub fn movement_direction(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }
    direction.normalize_or_zero()
}

fn overlaps(center: Vec2, half: Vec2, rect: &Rect) -> bool {
    center.x - half.x < rect.max.x
        && center.x + half.x > rect.min.x
        && center.y - half.y < rect.max.y
        && center.y + half.y > rect.min.y
}

/// Moves a box one axis at a time, stopping flush against solids, then clamps it
/// inside `bounds`.
pub fn step_player(position: Vec2, delta: Vec2, half: Vec2, bounds: Rect, solids: &[Rect]) -> Vec2 {
    let mut next = position;

    next.x += delta.x;
    for rect in solids.iter() {
        if !overlaps(next, half, rect) {
            continue;
        }
        if delta.x > 0.0 {
            next.x = rect.min.x - half.x;
        } else if delta.x < 0.0 {
            next.x = rect.max.x + half.x;
        }
    }

    next.y += delta.y;
    for rect in solids.iter() {
        if !overlaps(next, half, rect) {
            continue;
        }
        if delta.y > 0.0 {
            next.y = rect.min.y - half.y;
        } else if delta.y < 0.0 {
            next.y = rect.max.y + half.y;
        }
    }

    next.clamp(bounds.min + half, bounds.max - half)
}

pub fn spawn_player(mut commands: Commands, layout: Res<OfficeLayout>, session: Res<GameSession>) {
    let position = layout.to_world(layout.player_start());
    commands
        .spawn((
            Sprite::from_color(hex("f4a261"), PLAYER_SIZE),
            Transform::from_translation(position.extend(PLAYER_Z)),
            Player,
            OfficeEntity,
            Name::new("Player"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(session.player_name()),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, NAME_TAG_OFFSET, 1.0),
                PlayerNameTag,
            ));
        });
    info!("Player '{}' entered the office", session.player_name());
}

pub fn move_player(
    keys: Res<ButtonInput<KeyCode>>,
    clock: Res<SimulationClock>,
    config: Res<GameConfig>,
    layout: Res<OfficeLayout>,
    solids: Query<&Solid>,
    mut player: Query<&mut Transform, With<Player>>,
) {
    let direction = movement_direction(&keys);
    if direction == Vec2::ZERO {
        return;
    }
    let Ok(mut transform) = player.single_mut() else {
        return;
    };

    let rects: Vec<Rect> = solids.iter().map(|solid| solid.bounds).collect();
    let delta = direction * config.world.player_speed * clock.delta_secs();
    let next = step_player(
        transform.translation.truncate(),
        delta,
        PLAYER_SIZE / 2.0,
        layout.world_bounds(),
        &rects,
    );
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

/// Finds the closest NPC whose interaction zone contains the player.
pub fn detect_nearby_npcs(
    player_query: Query<&Transform, With<Player>>,
    npc_query: Query<(&Transform, &Npc, &InteractionZone), Without<Player>>,
    mut interaction_state: ResMut<PlayerInteractionState>,
) {
    let Ok(player_transform) = player_query.single() else {
        interaction_state.nearby_npc = None;
        return;
    };
    let player_pos = player_transform.translation.truncate();

    let nearest = npc_query
        .iter()
        .filter(|(transform, _, zone)| zone.contains(transform.translation.truncate(), player_pos))
        .map(|(transform, npc, _)| (npc, player_pos.distance(transform.translation.truncate())))
        .min_by(|(_, a), (_, b)| a.total_cmp(b));

    let nearby = nearest.map(|(npc, distance)| NearbyNpcInfo {
        name: npc.name.clone(),
        distance,
    });
    if interaction_state.nearby_npc != nearby {
        interaction_state.nearby_npc = nearby;
    }
}

/// E or Space next to an NPC asks to start a conversation.
pub fn handle_player_interaction_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    interaction_state: Res<PlayerInteractionState>,
    mut talk_requests: MessageWriter<TalkRequested>,
) {
    if !keyboard.any_just_pressed([KeyCode::KeyE, KeyCode::Space]) {
        return;
    }

    let Some(nearby) = interaction_state.nearby_npc.as_ref() else {
        debug!("Player pressed talk but no NPC nearby");
        return;
    };

    debug!(
        "Player asks to talk with {} (distance: {:.1})",
        nearby.name, nearby.distance
    );
    talk_requests.write(TalkRequested {
        npc: nearby.name.clone(),
    });
}

/// Escape while roaming pauses the run and returns to the menu.
pub fn leave_to_menu(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<GameSession>,
    mut next_screen: ResMut<NextState<GameScreen>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    session.set_has_save(true);
    next_screen.set(GameScreen::Menu);
    info!("Run paused in week {}", session.week());
}

/// Whether "Press E to talk" should show while roaming.
pub fn talk_prompt_visible(state: &PlayerInteractionState, session: &GameSession) -> bool {
    state.nearby_npc.is_some() && !session.weekly_limit_reached()
}

pub fn clear_interaction_state(mut interaction_state: ResMut<PlayerInteractionState>) {
    interaction_state.nearby_npc = None;
}
