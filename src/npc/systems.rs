//! Systems related to NPC spawning and mood display.
use bevy::prelude::*;

use crate::{
    company::team::TeamMoods,
    npc::{
        components::{InteractionZone, MoodBarFill, Npc},
        roster::{NpcDef, NpcRoster},
    },
    world::{components::OfficeEntity, layout::OfficeLayout, systems::hex},
};

pub const NPC_Z: f32 = 5.0;
pub const NPC_SIZE: Vec2 = Vec2::new(28.0, 40.0);
const INTERACTION_ZONE: Vec2 = Vec2::new(140.0, 120.0);
const LABEL_OFFSET: f32 = 40.0;
const MOOD_BAR_OFFSET: f32 = 28.0;
const MOOD_BAR_SIZE: Vec2 = Vec2::new(50.0, 6.0);

/// Office position of an NPC, placed around the central desk.
pub fn npc_office_position(layout: &OfficeLayout, npc: &NpcDef) -> Vec2 {
    layout.center() + Vec2::from(npc.offset)
}

pub fn mood_color(mood: i32) -> Color {
    if mood > 66 {
        hex("00ff00")
    } else if mood > 33 {
        hex("ffff00")
    } else {
        hex("ff0000")
    }
}

/// Fill width and its x offset so the bar stays left-aligned.
fn mood_fill(mood: i32) -> (f32, f32) {
    let width = MOOD_BAR_SIZE.x * mood.clamp(0, 100) as f32 / 100.0;
    (width, (width - MOOD_BAR_SIZE.x) / 2.0)
}

/// Spawns every roster NPC with a name/role label and a mood bar.
pub fn spawn_npcs(
    mut commands: Commands,
    roster: Res<NpcRoster>,
    layout: Res<OfficeLayout>,
    moods: Res<TeamMoods>,
) {
    for npc in roster.iter() {
        let position = layout.to_world(npc_office_position(&layout, npc));
        let mood = moods.get(&npc.name).unwrap_or(npc.mood);
        let (fill_width, fill_x) = mood_fill(mood);

        commands
            .spawn((
                Sprite::from_color(npc.body_color(), NPC_SIZE),
                Transform::from_translation(position.extend(NPC_Z)),
                Npc {
                    name: npc.name.clone(),
                },
                InteractionZone::from_size(INTERACTION_ZONE),
                OfficeEntity,
                Name::new(format!("NPC {}", npc.name)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(format!("{} ({})", npc.name, npc.role)),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, LABEL_OFFSET, 1.0),
                ));
                parent.spawn((
                    Sprite::from_color(hex("333333"), MOOD_BAR_SIZE),
                    Transform::from_xyz(0.0, MOOD_BAR_OFFSET, 1.0),
                ));
                parent.spawn((
                    Sprite::from_color(mood_color(mood), Vec2::new(fill_width, MOOD_BAR_SIZE.y)),
                    Transform::from_xyz(fill_x, MOOD_BAR_OFFSET, 1.5),
                    MoodBarFill {
                        npc: npc.name.clone(),
                    },
                ));
            });
    }

    info!("Spawned {} NPCs", roster.len());
}

pub fn update_mood_bars(
    moods: Res<TeamMoods>,
    mut bars: Query<(&MoodBarFill, &mut Sprite, &mut Transform)>,
) {
    for (bar, mut sprite, mut transform) in bars.iter_mut() {
        let Some(mood) = moods.get(&bar.npc) else {
            continue;
        };
        let (width, x) = mood_fill(mood);
        sprite.custom_size = Some(Vec2::new(width, MOOD_BAR_SIZE.y));
        sprite.color = mood_color(mood);
        transform.translation.x = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::roster::Roster;

    #[test]
    fn mood_colours_follow_thresholds() {
        assert_eq!(mood_color(80), hex("00ff00"));
        assert_eq!(mood_color(66), hex("ffff00"));
        assert_eq!(mood_color(34), hex("ffff00"));
        assert_eq!(mood_color(33), hex("ff0000"));
    }

    #[test]
    fn mood_fill_stays_left_aligned() {
        assert_eq!(mood_fill(100), (50.0, 0.0));
        assert_eq!(mood_fill(50), (25.0, -12.5));
        assert_eq!(mood_fill(0), (0.0, -25.0));
    }

    #[test]
    fn npcs_ring_the_central_desk() {
        let roster = Roster::embedded().expect("built-in roster parses");
        let layout = OfficeLayout::new(Vec2::new(1280.0, 720.0));
        let rick = roster.npcs.get("Rick").expect("Rick exists");
        assert_eq!(npc_office_position(&layout, rick), Vec2::new(820.0, 416.0));
    }

    #[test]
    fn zone_is_140_by_120() {
        let zone = InteractionZone::from_size(INTERACTION_ZONE);
        assert!(zone.contains(Vec2::ZERO, Vec2::new(70.0, 60.0)));
        assert!(!zone.contains(Vec2::ZERO, Vec2::new(71.0, 0.0)));
        assert!(!zone.contains(Vec2::ZERO, Vec2::new(0.0, 61.0)));
    }
}
