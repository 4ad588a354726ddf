// src/ui/plugin.rs
//
// UiPlugin spawns each screen on state entry, despawns it on exit and wires the widgets.

use bevy::prelude::*;

use super::{
    dialogue_box::{
        close_dialogue_box, dialogue_box_clicks, pulse_choice_cards, spawn_dialogue_box,
        sync_dialogue_box, DialogueBoxRoot,
    },
    end_screen::{fall_confetti, handle_end_buttons, spawn_end_screen, EndScreenRoot},
    founder_panel::{founder_panel_clicks, spawn_founder_panel, FounderPanelRoot},
    hud::{
        spawn_hud, update_hud_stats, update_talk_prompt, update_week_counter, HudDeltas, HudRoot,
    },
    investment_panel::{
        investment_input, spawn_investment_panel, sync_investment_panel, InvestmentPanelRoot,
    },
    menu::{dismiss_credits, handle_menu_buttons, spawn_menu, MenuRoot},
    notices::{dismiss_notice, spawn_notice, NoticeRoot},
    settings::{
        close_name_editor, edit_player_name, handle_settings_buttons, spawn_settings, NameEditor,
        SettingsRoot,
    },
    toast::{handle_toast_requests, spawn_toast_container, update_toasts},
    week_banner::{
        close_week_banner, run_week_banner, spawn_week_banner, WeekBannerRoot, WeekBannerTimer,
    },
    widgets::{despawn_with, update_button_colors},
};
use crate::{
    company::investment::InvestmentDraft,
    core::state::{GameScreen, OfficePhase},
    dialogue::{conversation::Conversation, founders::FounderVisitLine},
    minigame::PendingMinigame,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.init_resource::<HudDeltas>()
            .add_systems(Startup, spawn_toast_container)
            .add_systems(
                Update,
                (update_button_colors, handle_toast_requests, update_toasts),
            );

        // Menu and settings screens.
        app.add_systems(OnEnter(GameScreen::Menu), spawn_menu)
            .add_systems(OnExit(GameScreen::Menu), despawn_with::<MenuRoot>)
            .add_systems(OnEnter(GameScreen::Settings), spawn_settings)
            .add_systems(
                OnExit(GameScreen::Settings),
                (close_name_editor, despawn_with::<SettingsRoot>),
            )
            .add_systems(
                Update,
                (
                    (handle_menu_buttons, dismiss_credits).run_if(in_state(GameScreen::Menu)),
                    (
                        handle_settings_buttons,
                        edit_player_name.run_if(resource_exists::<NameEditor>),
                    )
                        .run_if(in_state(GameScreen::Settings)),
                ),
            );

        // Office HUD and phase overlays.
        app.add_systems(OnEnter(GameScreen::Office), spawn_hud)
            .add_systems(OnExit(GameScreen::Office), despawn_with::<HudRoot>)
            .add_systems(
                OnEnter(OfficePhase::Dialogue),
                spawn_dialogue_box.run_if(resource_exists::<Conversation>),
            )
            .add_systems(
                OnExit(OfficePhase::Dialogue),
                (close_dialogue_box, despawn_with::<DialogueBoxRoot>),
            )
            .add_systems(
                OnExit(OfficePhase::Investment),
                despawn_with::<InvestmentPanelRoot>,
            )
            .add_systems(OnEnter(OfficePhase::Notice), spawn_notice)
            .add_systems(OnExit(OfficePhase::Notice), despawn_with::<NoticeRoot>)
            .add_systems(OnEnter(OfficePhase::WeekBanner), spawn_week_banner)
            .add_systems(
                OnExit(OfficePhase::WeekBanner),
                (close_week_banner, despawn_with::<WeekBannerRoot>),
            )
            .add_systems(
                OnExit(OfficePhase::FounderVisit),
                despawn_with::<FounderPanelRoot>,
            )
            .add_systems(
                Update,
                (
                    (update_hud_stats, update_week_counter, update_talk_prompt)
                        .run_if(in_state(GameScreen::Office)),
                    (sync_dialogue_box, dialogue_box_clicks, pulse_choice_cards).run_if(
                        in_state(OfficePhase::Dialogue).and(resource_exists::<Conversation>),
                    ),
                    (
                        spawn_investment_panel.run_if(resource_added::<InvestmentDraft>),
                        investment_input,
                        sync_investment_panel.run_if(resource_exists::<InvestmentDraft>),
                    )
                        .chain()
                        .run_if(in_state(OfficePhase::Investment)),
                    dismiss_notice.run_if(
                        in_state(OfficePhase::Notice).and(resource_exists::<PendingMinigame>),
                    ),
                    run_week_banner.run_if(
                        in_state(OfficePhase::WeekBanner).and(resource_exists::<WeekBannerTimer>),
                    ),
                    (
                        spawn_founder_panel.run_if(resource_added::<FounderVisitLine>),
                        founder_panel_clicks,
                    )
                        .run_if(in_state(OfficePhase::FounderVisit)),
                ),
            );

        // End screen.
        app.add_systems(OnEnter(GameScreen::End), spawn_end_screen)
            .add_systems(OnExit(GameScreen::End), despawn_with::<EndScreenRoot>)
            .add_systems(
                Update,
                (handle_end_buttons, fall_confetti).run_if(in_state(GameScreen::End)),
            );
    }
}
