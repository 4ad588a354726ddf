// src/ui/investment_panel.rs
//
// Weekly investment panel. Keys and buttons both turn into InvestmentAction messages.

use bevy::{ecs::message::MessageWriter, prelude::*};

use crate::{
    company::{
        events::InvestmentAction,
        investment::{Allocation, Category, InvestmentDraft},
        session::GameSession,
        stats::format_number,
    },
    ui::widgets::{
        full_screen_column, spawn_button, text, BODY_TEXT_COLOR, BUTTON_TEXT_COLOR,
        PANEL_BORDER_COLOR, PANEL_COLOR,
    },
};

const INVEST_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];
const WITHDRAW_KEYS: [KeyCode; 3] = [KeyCode::KeyQ, KeyCode::KeyW, KeyCode::KeyE];
const KEY_HINT: &str = "1/2/3 invest  Q/W/E withdraw  Enter confirm  Esc skip";

#[derive(Component)]
pub struct InvestmentPanelRoot;

#[derive(Component)]
pub struct BudgetLineText;

#[derive(Component)]
pub struct PreviewLineText;

#[derive(Component)]
pub struct CategoryAmountText(pub Category);

#[derive(Component, Debug, Clone, Copy)]
pub struct InvestmentButton(pub InvestmentAction);

pub fn category_line(category: Category, allocation: &Allocation) -> String {
    format!("{}: ${}", category.label(), format_number(allocation.get(category)))
}

pub fn last_allocation_line(allocation: &Allocation) -> String {
    format!(
        "Last week: Marketing ${} / Tech ${} / Hiring ${}",
        format_number(allocation.marketing),
        format_number(allocation.tech),
        format_number(allocation.hiring)
    )
}

/// Keyboard shortcuts for the panel.
pub fn investment_key_action(keys: &ButtonInput<KeyCode>) -> Option<InvestmentAction> {
    for (index, category) in Category::ALL.into_iter().enumerate() {
        if keys.just_pressed(INVEST_KEYS[index]) {
            return Some(InvestmentAction::Invest(category));
        }
        if keys.just_pressed(WITHDRAW_KEYS[index]) {
            return Some(InvestmentAction::Withdraw(category));
        }
    }
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        return Some(InvestmentAction::Confirm);
    }
    if keys.just_pressed(KeyCode::Escape) {
        return Some(InvestmentAction::Skip);
    }
    None
}

pub fn spawn_investment_panel(
    mut commands: Commands,
    draft: Res<InvestmentDraft>,
    session: Res<GameSession>,
) {
    let allocation = draft.allocation();

    commands
        .spawn((
            full_screen_column(0.0),
            BackgroundColor(Color::BLACK.with_alpha(0.55)),
            GlobalZIndex(6),
            InvestmentPanelRoot,
            Name::new("Investment Panel"),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        width: Val::Px(560.0),
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(PANEL_COLOR),
                    BorderColor::from(PANEL_BORDER_COLOR),
                ))
                .with_children(|panel| {
                    panel.spawn(text(
                        format!("Week {} Investment", session.week()),
                        26.0,
                        Color::WHITE,
                    ));
                    panel.spawn((text(draft.budget_line(), 18.0, BODY_TEXT_COLOR), BudgetLineText));
                    if let Some(last) = session.last_allocation() {
                        panel.spawn(text(last_allocation_line(&last), 14.0, BUTTON_TEXT_COLOR));
                    }

                    for category in Category::ALL {
                        panel
                            .spawn(Node {
                                width: Val::Percent(100.0),
                                justify_content: JustifyContent::SpaceBetween,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(10.0),
                                ..default()
                            })
                            .with_children(|row| {
                                row.spawn((
                                    text(category_line(category, &allocation), 18.0, Color::WHITE),
                                    CategoryAmountText(category),
                                ));
                                row.spawn(Node {
                                    column_gap: Val::Px(8.0),
                                    ..default()
                                })
                                .with_children(|buttons| {
                                    spawn_button(
                                        buttons,
                                        "-",
                                        20.0,
                                        InvestmentButton(InvestmentAction::Withdraw(category)),
                                    );
                                    spawn_button(
                                        buttons,
                                        "+",
                                        20.0,
                                        InvestmentButton(InvestmentAction::Invest(category)),
                                    );
                                });
                            });
                    }

                    panel.spawn((
                        text(draft.preview_line(), 16.0, BUTTON_TEXT_COLOR),
                        PreviewLineText,
                    ));
                    panel
                        .spawn(Node {
                            column_gap: Val::Px(16.0),
                            ..default()
                        })
                        .with_children(|actions| {
                            spawn_button(
                                actions,
                                "Confirm",
                                22.0,
                                InvestmentButton(InvestmentAction::Confirm),
                            );
                            spawn_button(
                                actions,
                                "Skip",
                                22.0,
                                InvestmentButton(InvestmentAction::Skip),
                            );
                        });
                    panel.spawn(text(KEY_HINT, 12.0, BUTTON_TEXT_COLOR));
                });
        });
}

pub fn investment_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Query<(&Interaction, &InvestmentButton), Changed<Interaction>>,
    mut actions: MessageWriter<InvestmentAction>,
) {
    if let Some(action) = investment_key_action(&keys) {
        actions.write(action);
    }
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            actions.write(button.0);
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn sync_investment_panel(
    draft: Res<InvestmentDraft>,
    mut budget: Query<&mut Text, (With<BudgetLineText>, Without<PreviewLineText>)>,
    mut preview: Query<&mut Text, (With<PreviewLineText>, Without<BudgetLineText>)>,
    mut amounts: Query<
        (&mut Text, &CategoryAmountText),
        (Without<BudgetLineText>, Without<PreviewLineText>),
    >,
) {
    if !draft.is_changed() {
        return;
    }
    let allocation = draft.allocation();
    for mut shown in budget.iter_mut() {
        shown.0 = draft.budget_line();
    }
    for mut shown in preview.iter_mut() {
        shown.0 = draft.preview_line();
    }
    for (mut shown, amount) in amounts.iter_mut() {
        shown.0 = category_line(amount.0, &allocation);
    }
}
