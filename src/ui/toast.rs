// src/ui/toast.rs
//
// Short top-center notifications driven by ToastRequested messages.

use bevy::{ecs::message::MessageReader, picking::Pickable, prelude::*};

use crate::{company::events::ToastRequested, core::plugin::SimulationClock};

pub const MAX_VISIBLE_TOASTS: usize = 3;
const FADE_SECONDS: f32 = 0.3;
const TOAST_BACKGROUND_ALPHA: f32 = 0.75;

#[derive(Component)]
pub struct ToastContainer;

#[derive(Component, Debug)]
pub struct ToastItem {
    pub timer: Timer,
    pub fade_timer: Option<Timer>,
}

impl ToastItem {
    pub fn new(seconds: f32) -> Self {
        Self {
            timer: Timer::from_seconds(seconds, TimerMode::Once),
            fade_timer: None,
        }
    }

    /// Ticks the display then fade timers. Returns the alpha to draw with, or
    /// `None` once fully faded.
    pub fn advance(&mut self, delta: std::time::Duration) -> Option<f32> {
        match self.fade_timer.as_mut() {
            None => {
                if self.timer.tick(delta).just_finished() {
                    self.fade_timer = Some(Timer::from_seconds(FADE_SECONDS, TimerMode::Once));
                }
                Some(1.0)
            }
            Some(fade) => {
                fade.tick(delta);
                (!fade.is_finished()).then(|| 1.0 - fade.fraction())
            }
        }
    }
}

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastContainer,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            align_items: AlignItems::Center,
            ..default()
        },
        GlobalZIndex(20),
        Pickable::IGNORE,
        Name::new("Toasts"),
    ));
}

pub fn handle_toast_requests(
    mut commands: Commands,
    mut requests: MessageReader<ToastRequested>,
    container: Query<Entity, With<ToastContainer>>,
    existing: Query<Entity, With<ToastItem>>,
) {
    let Ok(container) = container.single() else {
        return;
    };

    let mut visible: Vec<Entity> = existing.iter().collect();
    for request in requests.read() {
        if visible.len() >= MAX_VISIBLE_TOASTS {
            let oldest = visible.remove(0);
            commands.entity(oldest).despawn();
        }

        let toast = commands
            .spawn((
                ToastItem::new(request.seconds),
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(Color::BLACK.with_alpha(TOAST_BACKGROUND_ALPHA)),
                Pickable::IGNORE,
                children![(
                    Text::new(request.message.clone()),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                )],
            ))
            .id();
        commands.entity(container).add_child(toast);
        visible.push(toast);
    }
}

pub fn update_toasts(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut toasts: Query<(Entity, &mut ToastItem, &mut BackgroundColor, &Children)>,
    mut text_colors: Query<&mut TextColor>,
) {
    for (entity, mut toast, mut background, children) in toasts.iter_mut() {
        let Some(alpha) = toast.advance(clock.delta()) else {
            commands.entity(entity).despawn();
            continue;
        };
        if toast.fade_timer.is_none() {
            continue;
        }
        background.0 = Color::BLACK.with_alpha(TOAST_BACKGROUND_ALPHA * alpha);
        for child in children.iter() {
            if let Ok(mut color) = text_colors.get_mut(child) {
                color.0 = Color::WHITE.with_alpha(alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn toast_holds_then_fades_out() {
        let mut toast = ToastItem::new(1.0);
        assert_eq!(toast.advance(Duration::from_millis(500)), Some(1.0));
        assert!(toast.fade_timer.is_none());
        assert_eq!(toast.advance(Duration::from_millis(500)), Some(1.0));
        assert!(toast.fade_timer.is_some());

        let alpha = toast.advance(Duration::from_millis(150)).expect("still fading");
        assert!((alpha - 0.5).abs() < 1e-3);
        assert_eq!(toast.advance(Duration::from_millis(200)), None);
    }

    #[test]
    fn at_most_three_toasts_stay_on_screen() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<ToastRequested>()
            .add_systems(Startup, spawn_toast_container)
            .add_systems(Update, handle_toast_requests);
        app.update();

        for message in ["one", "two", "three", "four"] {
            app.world_mut()
                .write_message(ToastRequested::new(message, 2.0));
        }
        app.update();

        let toasts = app
            .world_mut()
            .query::<&ToastItem>()
            .iter(app.world())
            .count();
        assert_eq!(toasts, MAX_VISIBLE_TOASTS);
    }
}
