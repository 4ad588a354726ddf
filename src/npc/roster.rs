//! NPC and founder content loaded from `config/roster.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::{
    company::stats::StatEffects,
    dialogue::{
        errors::RosterError,
        founders::{FounderDef, FounderRoster},
    },
};

const ROSTER_PATH: &str = "config/roster.toml";
const EMBEDDED_ROSTER: &str = include_str!("../../config/roster.toml");
const DEFAULT_NPC_MOOD: i32 = 80;
const CHOICES_PER_QUESTION: usize = 2;
const PLAYER_TOKEN: &str = "{player}";

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceDef {
    pub label: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub effects: StatEffects,
}

impl ChoiceDef {
    pub fn result_text(&self) -> &str {
        self.result
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("Noted.")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDef {
    pub lines: Vec<String>,
    pub choices: Vec<ChoiceDef>,
}

impl QuestionDef {
    /// Question lines with `{player}` replaced.
    pub fn lines_for(&self, player_name: &str) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.replace(PLAYER_TOKEN, player_name))
            .collect()
    }
}

fn default_mood() -> i32 {
    DEFAULT_NPC_MOOD
}

#[derive(Debug, Clone, Deserialize)]
pub struct NpcDef {
    pub name: String,
    pub role: String,
    /// Offset from the office centre, x right and y down, in pixels.
    pub offset: [f32; 2],
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_mood")]
    pub mood: i32,
    #[serde(default, rename = "question")]
    pub questions: Vec<QuestionDef>,
}

impl NpcDef {
    pub fn body_color(&self) -> Color {
        self.color
            .as_deref()
            .and_then(|hex| Srgba::hex(hex).ok())
            .map(Color::from)
            .unwrap_or(Color::srgb_u8(0xa8, 0xc8, 0xff))
    }

    pub fn question(&self, index: usize) -> Option<&QuestionDef> {
        self.questions.get(index)
    }
}

/// Static NPC definitions in spawn order.
#[derive(Resource, Debug, Clone, Default)]
pub struct NpcRoster {
    npcs: Vec<NpcDef>,
}

impl NpcRoster {
    pub fn new(npcs: Vec<NpcDef>) -> Self {
        Self { npcs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NpcDef> {
        self.npcs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&NpcDef> {
        self.npcs.iter().find(|npc| npc.name == name)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn starting_moods(&self) -> impl Iterator<Item = (&str, i32)> {
        self.npcs.iter().map(|npc| (npc.name.as_str(), npc.mood))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawRosterFile {
    #[serde(default)]
    npc: Vec<NpcDef>,
    #[serde(default)]
    founder: Vec<FounderDef>,
}

/// Parsed and validated roster content.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub npcs: NpcRoster,
    pub founders: FounderRoster,
}

impl Roster {
    pub fn from_toml_str(data: &str) -> Result<Self, RosterError> {
        let raw: RawRosterFile = toml::from_str(data)?;
        if raw.npc.is_empty() {
            return Err(RosterError::Empty { section: "npc" });
        }
        if raw.founder.is_empty() {
            return Err(RosterError::Empty { section: "founder" });
        }
        for npc in &raw.npc {
            for (index, question) in npc.questions.iter().enumerate() {
                validate_question(npc, index, question)?;
            }
        }
        Ok(Self {
            npcs: NpcRoster::new(raw.npc),
            founders: FounderRoster::new(raw.founder),
        })
    }

    pub fn embedded() -> Result<Self, RosterError> {
        Self::from_toml_str(EMBEDDED_ROSTER)
    }

    /// Reads the on-disk roster, falling back to the embedded copy.
    pub fn load_or_default() -> Self {
        let path = Path::new(ROSTER_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match Self::from_toml_str(&data) {
                Ok(roster) => return roster,
                Err(err) => warn!(
                    "Failed to load {} ({}). Falling back to the built-in roster.",
                    path.display(),
                    err
                ),
            },
            Err(err) => debug!(
                "No roster override at {} ({}). Using the built-in roster.",
                path.display(),
                err
            ),
        }

        Self::embedded().unwrap_or_else(|err| {
            error!("Built-in roster is invalid: {}", err);
            Self::default()
        })
    }
}

fn validate_question(npc: &NpcDef, index: usize, question: &QuestionDef) -> Result<(), RosterError> {
    let invalid = |reason: String| RosterError::InvalidQuestion {
        npc: npc.name.clone(),
        index,
        reason,
    };
    if question.lines.is_empty() {
        return Err(invalid("no dialog lines".to_string()));
    }
    if question.choices.len() != CHOICES_PER_QUESTION {
        return Err(invalid(format!(
            "expected {} choices, found {}",
            CHOICES_PER_QUESTION,
            question.choices.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::stats::CompanyStats;

    #[test]
    fn embedded_roster_has_four_npcs_with_twelve_questions() {
        let roster = Roster::embedded().expect("built-in roster parses");
        let names: Vec<_> = roster.npcs.iter().map(|npc| npc.name.as_str()).collect();
        assert_eq!(names, ["Rick", "Ava", "Max", "Liam"]);
        for npc in roster.npcs.iter() {
            assert_eq!(npc.questions.len(), 12, "{} question count", npc.name);
            assert_eq!(npc.mood, 80);
        }
        assert_eq!(roster.founders.len(), 4);
        assert_eq!(
            roster.founders.names().collect::<Vec<_>>(),
            ["Jared Friedman", "Garry Tan", "Michael Seibel", "Paul Graham"]
        );
    }

    #[test]
    fn embedded_roster_positions_and_effects() {
        let roster = Roster::embedded().expect("built-in roster parses");
        let rick = roster.npcs.get("Rick").expect("Rick exists");
        assert_eq!(rick.offset, [180.0, 20.0]);
        assert_eq!(rick.role, "Advisor Partner");

        let opener = rick.question(0).expect("first question");
        assert_eq!(
            opener.lines_for("Dana")[0],
            "Rick Advisor: So, Dana, what's your unfair advantage, besides caffeine?"
        );
        assert_eq!(opener.choices[1].effects.funds, -4_000);
        assert_eq!(opener.choices[1].effects.product, 12);

        let liam = roster.npcs.get("Liam").expect("Liam exists");
        assert_eq!(liam.offset, [-150.0, 200.0]);
    }

    #[test]
    fn founder_tips_follow_stat_thresholds() {
        let roster = Roster::embedded().expect("built-in roster parses");
        let broke = CompanyStats {
            funds: 1_000,
            ..CompanyStats::default()
        };
        let (name, tip) = roster.founders.tip_for(1, &broke).expect("Garry has tips");
        assert_eq!(name, "Garry Tan");
        assert!(tip.starts_with("Money dries up"));

        let thriving = CompanyStats {
            funds: 90_000,
            product: 70,
            morale: 70,
            hype: 70,
        };
        let (_, tip) = roster.founders.tip_for(3, &thriving).expect("Paul has tips");
        assert_eq!(tip, "Strong position. Prepare for scaling.");
    }

    #[test]
    fn rejects_question_without_two_choices() {
        let data = r#"
            [[npc]]
            name = "Solo"
            role = "Tester"
            offset = [0.0, 0.0]

            [[npc.question]]
            lines = ["Solo: Pick one."]
            choices = [{ label = "Only option" }]

            [[founder]]
            name = "Someone"
            tips = [{ text = "Hi." }]
        "#;
        match Roster::from_toml_str(data) {
            Err(RosterError::InvalidQuestion { npc, index, .. }) => {
                assert_eq!(npc, "Solo");
                assert_eq!(index, 0);
            }
            other => panic!("expected invalid question, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_sections_and_fills_defaults() {
        assert!(matches!(
            Roster::from_toml_str(""),
            Err(RosterError::Empty { section: "npc" })
        ));

        let data = r#"
            [[npc]]
            name = "Quiet"
            role = "Observer"
            offset = [10.0, -10.0]

            [[founder]]
            name = "Someone"
            tips = [{ text = "Hi." }]
        "#;
        let roster = Roster::from_toml_str(data).expect("minimal roster parses");
        let quiet = roster.npcs.get("Quiet").expect("npc present");
        assert_eq!(quiet.mood, 80);
        assert!(quiet.questions.is_empty());
        assert!(quiet.color.is_none());
    }

    #[test]
    fn missing_result_reads_as_noted() {
        let choice = ChoiceDef {
            label: "Shrug".to_string(),
            result: None,
            effects: StatEffects::default(),
        };
        assert_eq!(choice.result_text(), "Noted.");
    }
}
