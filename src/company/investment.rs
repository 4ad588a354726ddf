//! Weekly investment budget, allocation drafting and its stat effects.
use std::fmt;

use bevy::prelude::*;
use serde::Serialize;

use crate::{
    company::stats::{describe_effects_or, format_number, CompanyStats, StatEffects},
    core::config::{InvestmentRules, MinigameRules},
    minigame::MinigameKind,
};

/// Dollars per effect unit in the allocation formulas.
const UNIT: f64 = 1_000.0;
/// Marketing spend that costs one point of morale.
const MARKETING_MORALE_COST: i64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Marketing,
    Tech,
    Hiring,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Marketing, Category::Tech, Category::Hiring];

    pub fn label(self) -> &'static str {
        match self {
            Self::Marketing => "Marketing",
            Self::Tech => "Tech",
            Self::Hiring => "Hiring",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dollars put into each category this week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub marketing: i64,
    pub tech: i64,
    pub hiring: i64,
}

impl Allocation {
    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Marketing => self.marketing,
            Category::Tech => self.tech,
            Category::Hiring => self.hiring,
        }
    }

    fn slot(&mut self, category: Category) -> &mut i64 {
        match category {
            Category::Marketing => &mut self.marketing,
            Category::Tech => &mut self.tech,
            Category::Hiring => &mut self.hiring,
        }
    }

    pub fn total(&self) -> i64 {
        self.marketing + self.tech + self.hiring
    }

    /// Marketing buys hype but burns morale, tech builds product, hiring
    /// lifts morale and a little product.
    pub fn effects(&self) -> StatEffects {
        let marketing = self.marketing as f64 / UNIT;
        let tech = self.tech as f64 / UNIT;
        let hiring = self.hiring as f64 / UNIT;
        let morale_cost = self.marketing.div_euclid(MARKETING_MORALE_COST) as f64;

        StatEffects {
            funds: 0,
            hype: round_half_up(marketing * 2.0),
            product: round_half_up(tech * 1.5 + hiring * 0.5),
            morale: round_half_up(hiring * 2.0 - morale_cost),
        }
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Largest total the player may invest this week.
pub fn max_budget(funds: i64, rules: &InvestmentRules) -> i64 {
    if funds <= 0 {
        return 0;
    }
    let scaled = (funds as f64 * rules.budget_fraction / rules.step as f64).floor() as i64;
    funds.min(rules.min_budget.max(scaled * rules.step))
}

/// What happened when an allocation was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestmentReceipt {
    pub allocation: Allocation,
    pub spent: i64,
    pub effects: StatEffects,
    pub previous: CompanyStats,
}

impl InvestmentReceipt {
    pub fn summary(&self) -> String {
        format!(
            "Invested ${} - Effects: {}",
            format_number(self.spent),
            describe_effects_or(&self.effects, "No change")
        )
    }
}

/// Allocation being edited in the investment panel.
#[derive(Resource, Debug, Clone)]
pub struct InvestmentDraft {
    allocation: Allocation,
    budget: i64,
    step: i64,
}

impl InvestmentDraft {
    pub fn new(funds: i64, rules: &InvestmentRules) -> Self {
        Self {
            allocation: Allocation::default(),
            budget: max_budget(funds, rules),
            step: rules.step,
        }
    }

    pub fn allocation(&self) -> Allocation {
        self.allocation
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn remaining(&self) -> i64 {
        self.budget - self.allocation.total()
    }

    /// Adds one step to `category` unless that would exceed the budget.
    pub fn invest(&mut self, category: Category) -> bool {
        if self.allocation.total() + self.step > self.budget {
            return false;
        }
        *self.allocation.slot(category) += self.step;
        true
    }

    /// Removes one step from `category` if it holds at least one step.
    pub fn withdraw(&mut self, category: Category) -> bool {
        let step = self.step;
        let slot = self.allocation.slot(category);
        if *slot < step {
            return false;
        }
        *slot -= step;
        true
    }

    pub fn preview_line(&self) -> String {
        format!(
            "Projected: {}",
            describe_effects_or(&self.allocation.effects(), "No change")
        )
    }

    pub fn budget_line(&self) -> String {
        format!(
            "Budget: ${}  Remaining: ${}",
            format_number(self.budget),
            format_number(self.remaining())
        )
    }

    /// Spends the allocation. `None` when nothing was allocated, which the
    /// panel treats as a skip.
    pub fn settle(&self, stats: &mut CompanyStats) -> Option<InvestmentReceipt> {
        let spent = self.allocation.total();
        if spent <= 0 {
            return None;
        }
        let effects = self.allocation.effects();
        let previous = stats.apply(&StatEffects {
            funds: -spent,
            ..effects
        });
        Some(InvestmentReceipt {
            allocation: self.allocation,
            spent,
            effects,
            previous,
        })
    }
}

/// Minigame that follows the investment panel, if any.
pub fn follow_up_minigame(
    week: u32,
    rules: &MinigameRules,
    cleanup_npc_mood: Option<i32>,
) -> Option<MinigameKind> {
    if week == rules.bug_week {
        return Some(MinigameKind::BugHunt);
    }
    match cleanup_npc_mood {
        Some(mood) if mood < rules.cleanup_mood_threshold => Some(MinigameKind::Cleanup),
        _ => None,
    }
}
