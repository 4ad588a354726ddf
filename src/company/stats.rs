//! Company stats and the reducer that applies choice effects to them.
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::StartingStats;

pub const PERCENT_MIN: i32 = 0;
pub const PERCENT_MAX: i32 = 100;

/// One of the four tracked company stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Funds,
    Product,
    Morale,
    Hype,
}

impl Stat {
    pub const ALL: [Stat; 4] = [Stat::Funds, Stat::Product, Stat::Morale, Stat::Hype];

    pub fn label(self) -> &'static str {
        match self {
            Self::Funds => "Funds",
            Self::Product => "Product",
            Self::Morale => "Morale",
            Self::Hype => "Hype",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed deltas for each stat. Keys missing from content files read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StatEffects {
    pub funds: i64,
    pub product: i32,
    pub morale: i32,
    pub hype: i32,
}

impl StatEffects {
    pub fn funds(amount: i64) -> Self {
        Self {
            funds: amount,
            ..Self::default()
        }
    }

    pub fn morale(amount: i32) -> Self {
        Self {
            morale: amount,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.funds == 0 && self.product == 0 && self.morale == 0 && self.hype == 0
    }
}

/// Current company standing.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanyStats {
    pub funds: i64,
    pub product: i32,
    pub morale: i32,
    pub hype: i32,
}

impl CompanyStats {
    pub fn from_starting(start: &StartingStats) -> Self {
        Self {
            funds: start.funds,
            product: start.product,
            morale: start.morale,
            hype: start.hype,
        }
    }

    /// Adds every delta, clamps the percentage stats and floors funds at zero.
    /// Returns the stats as they were before the change.
    pub fn apply(&mut self, effects: &StatEffects) -> CompanyStats {
        let previous = *self;
        self.funds = self.funds.saturating_add(effects.funds).max(0);
        self.product = clamp_percent(self.product.saturating_add(effects.product));
        self.morale = clamp_percent(self.morale.saturating_add(effects.morale));
        self.hype = clamp_percent(self.hype.saturating_add(effects.hype));
        previous
    }

    pub fn is_bankrupt(&self) -> bool {
        self.funds <= 0
    }

    pub fn value(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Funds => self.funds,
            Stat::Product => i64::from(self.product),
            Stat::Morale => i64::from(self.morale),
            Stat::Hype => i64::from(self.hype),
        }
    }

    /// Per-stat difference `self - earlier`.
    pub fn delta_since(&self, earlier: &CompanyStats) -> StatEffects {
        StatEffects {
            funds: self.funds - earlier.funds,
            product: self.product - earlier.product,
            morale: self.morale - earlier.morale,
            hype: self.hype - earlier.hype,
        }
    }
}

impl Default for CompanyStats {
    fn default() -> Self {
        Self {
            funds: 50_000,
            product: 20,
            morale: 70,
            hype: 10,
        }
    }
}

fn clamp_percent(value: i32) -> i32 {
    value.clamp(PERCENT_MIN, PERCENT_MAX)
}

/// `1234567` -> `"1,234,567"`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// HUD suffix for a stat change: empty for zero, `"  (+1,000)"` otherwise.
pub fn format_delta(value: i64) -> String {
    match value.signum() {
        0 => String::new(),
        1 => format!("  (+{})", format_number(value)),
        _ => format!("  ({})", format_number(value)),
    }
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Human readable effect summary, e.g. `+$1,000, -5 Morale`.
pub fn describe_effects(effects: &StatEffects) -> String {
    let mut parts = Vec::new();
    if effects.funds > 0 {
        parts.push(format!("+${}", format_number(effects.funds)));
    } else if effects.funds < 0 {
        parts.push(format!("-${}", format_number(-effects.funds)));
    }
    for (value, stat) in [
        (effects.product, Stat::Product),
        (effects.morale, Stat::Morale),
        (effects.hype, Stat::Hype),
    ] {
        if value != 0 {
            parts.push(format!("{} {}", signed(i64::from(value)), stat));
        }
    }
    parts.join(", ")
}

/// Like [`describe_effects`] but never empty; used for investment previews.
pub fn describe_effects_or(effects: &StatEffects, fallback: &str) -> String {
    let text = describe_effects(effects);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applying_product_delta_adds_within_bounds() {
        let mut stats = CompanyStats::default();
        let previous = stats.apply(&StatEffects {
            product: 12,
            ..Default::default()
        });
        assert_eq!(previous.product, 20);
        assert_eq!(stats.product, 32);
    }

    #[test]
    fn apply_clamps_percentages_and_floors_funds() {
        let mut stats = CompanyStats {
            funds: 3_000,
            product: 95,
            morale: 4,
            hype: 50,
        };
        stats.apply(&StatEffects {
            funds: -10_000,
            product: 20,
            morale: -30,
            hype: 0,
        });
        assert_eq!(
            stats,
            CompanyStats {
                funds: 0,
                product: 100,
                morale: 0,
                hype: 50,
            }
        );
        assert!(stats.is_bankrupt());
    }

    #[test]
    fn missing_effect_keys_read_as_zero() {
        let effects: StatEffects = toml::from_str("Funds = -4000\nHype = 3").expect("parses");
        assert_eq!(effects.funds, -4_000);
        assert_eq!(effects.hype, 3);
        assert_eq!(effects.product, 0);
        assert_eq!(effects.morale, 0);
    }

    #[test]
    fn describes_effects_in_fixed_order() {
        let effects = StatEffects {
            funds: -4_000,
            product: 12,
            morale: -5,
            hype: 3,
        };
        assert_eq!(
            describe_effects(&effects),
            "-$4,000, +12 Product, -5 Morale, +3 Hype"
        );
        assert_eq!(describe_effects(&StatEffects::funds(1_000)), "+$1,000");
        assert_eq!(describe_effects(&StatEffects::default()), "");
        assert_eq!(
            describe_effects_or(&StatEffects::default(), "No change"),
            "No change"
        );
    }

    #[test]
    fn formats_numbers_and_deltas() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(50_000), "50,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-4_000), "-4,000");

        assert_eq!(format_delta(0), "");
        assert_eq!(format_delta(1_000), "  (+1,000)");
        assert_eq!(format_delta(-5), "  (-5)");
    }

    #[test]
    fn delta_since_reports_signed_changes() {
        let before = CompanyStats::default();
        let mut after = before;
        after.apply(&StatEffects {
            funds: -2_000,
            morale: 5,
            ..Default::default()
        });
        let delta = after.delta_since(&before);
        assert_eq!(delta.funds, -2_000);
        assert_eq!(delta.morale, 5);
        assert_eq!(delta.product, 0);
    }
}
