//! Founder visits: famous founders drop by every third week with a tip.
use bevy::prelude::*;
use serde::Deserialize;

use crate::company::stats::{CompanyStats, Stat};

/// One piece of advice, optionally gated on a stat being low.
#[derive(Debug, Clone, Deserialize)]
pub struct FounderTip {
    pub text: String,
    #[serde(default)]
    pub stat: Option<Stat>,
    #[serde(default)]
    pub below: Option<i64>,
}

impl FounderTip {
    pub fn applies_to(&self, stats: &CompanyStats) -> bool {
        match (self.stat, self.below) {
            (Some(stat), Some(threshold)) => stats.value(stat) < threshold,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FounderDef {
    pub name: String,
    pub tips: Vec<FounderTip>,
}

/// Founders in visiting order.
#[derive(Resource, Debug, Clone, Default)]
pub struct FounderRoster {
    founders: Vec<FounderDef>,
}

impl FounderRoster {
    pub fn new(founders: Vec<FounderDef>) -> Self {
        Self { founders }
    }

    pub fn len(&self) -> usize {
        self.founders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.founders.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.founders.iter().map(|founder| founder.name.as_str())
    }

    /// First tip of founder `index` whose condition holds for `stats`.
    pub fn tip_for(&self, index: usize, stats: &CompanyStats) -> Option<(&str, &str)> {
        let founder = self.founders.get(index)?;
        founder
            .tips
            .iter()
            .find(|tip| tip.applies_to(stats))
            .map(|tip| (founder.name.as_str(), tip.text.as_str()))
    }
}

/// Founder due to visit after the week banner, set on week advance.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingFounderVisit {
    pub index: Option<usize>,
}

/// Text of the visit currently on screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct FounderVisitLine {
    pub text: String,
}

impl FounderVisitLine {
    pub fn new(founder: &str, tip: &str) -> Self {
        Self {
            text: format!("{}: {}", founder, tip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> FounderRoster {
        let tips = vec![
            FounderTip {
                text: "Raise money.".to_string(),
                stat: Some(Stat::Funds),
                below: Some(2_000),
            },
            FounderTip {
                text: "Ship something.".to_string(),
                stat: Some(Stat::Product),
                below: Some(40),
            },
            FounderTip {
                text: "Keep going.".to_string(),
                stat: None,
                below: None,
            },
        ];
        FounderRoster::new(vec![FounderDef {
            name: "Paul Graham".to_string(),
            tips,
        }])
    }

    #[test]
    fn first_matching_tip_wins() {
        let roster = roster();
        let broke = CompanyStats {
            funds: 1_000,
            product: 10,
            morale: 50,
            hype: 50,
        };
        assert_eq!(roster.tip_for(0, &broke), Some(("Paul Graham", "Raise money.")));

        let weak_product = CompanyStats {
            funds: 30_000,
            ..broke
        };
        assert_eq!(
            roster.tip_for(0, &weak_product),
            Some(("Paul Graham", "Ship something."))
        );

        let healthy = CompanyStats {
            funds: 30_000,
            product: 80,
            morale: 80,
            hype: 80,
        };
        assert_eq!(roster.tip_for(0, &healthy), Some(("Paul Graham", "Keep going.")));
    }

    #[test]
    fn unknown_founder_has_no_tip() {
        assert!(roster().tip_for(3, &CompanyStats::default()).is_none());
    }

    #[test]
    fn visit_line_prefixes_the_founder() {
        assert_eq!(
            FounderVisitLine::new("Garry Tan", "Keep executing.").text,
            "Garry Tan: Keep executing."
        );
    }
}
