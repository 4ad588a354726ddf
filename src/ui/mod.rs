// src/ui/mod.rs
//
// Screen-space UI: menus, office HUD, phase overlays, toasts and the end screen.

pub mod dialogue_box;
pub mod end_screen;
pub mod founder_panel;
pub mod hud;
pub mod investment_panel;
pub mod menu;
pub mod notices;
pub mod plugin;
pub mod settings;
pub mod toast;
pub mod week_banner;
pub mod widgets;

pub use plugin::UiPlugin;
