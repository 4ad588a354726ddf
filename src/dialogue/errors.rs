//! Error types for rejected conversation actions and roster loading.
use std::fmt;

/// Why a conversation action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueError {
    WeeklyLimitReached { limit: usize },
    AlreadyTalked { npc: String },
    NoQuestionsLeft { npc: String },
    UnknownNpc { npc: String },
    ChoiceOutOfRange { index: usize, available: usize },
    NoChoicePending,
}

impl fmt::Display for DialogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeeklyLimitReached { limit } => {
                write!(f, "Weekly limit of {} conversations reached", limit)
            }
            Self::AlreadyTalked { npc } => write!(f, "Already talked to {} this week", npc),
            Self::NoQuestionsLeft { npc } => write!(f, "{} has nothing left to discuss", npc),
            Self::UnknownNpc { npc } => write!(f, "No NPC named {}", npc),
            Self::ChoiceOutOfRange { index, available } => write!(
                f,
                "Choice {} out of range ({} available)",
                index + 1,
                available
            ),
            Self::NoChoicePending => write!(f, "No choice is waiting for an answer"),
        }
    }
}

impl std::error::Error for DialogueError {}

/// Failures while loading NPC and founder content.
#[derive(Debug)]
pub enum RosterError {
    Parse(toml::de::Error),
    Empty { section: &'static str },
    InvalidQuestion {
        npc: String,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Roster parse error: {}", err),
            Self::Empty { section } => write!(f, "Roster section '{}' is empty", section),
            Self::InvalidQuestion { npc, index, reason } => {
                write!(f, "Question {} for {} is invalid: {}", index + 1, npc, reason)
            }
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_errors_render_readable_messages() {
        let limit = DialogueError::WeeklyLimitReached { limit: 2 };
        assert!(limit.to_string().contains('2'));

        let talked = DialogueError::AlreadyTalked {
            npc: "Ava".to_string(),
        };
        assert_eq!(talked.to_string(), "Already talked to Ava this week");

        let out_of_range = DialogueError::ChoiceOutOfRange {
            index: 2,
            available: 2,
        };
        assert_eq!(out_of_range.to_string(), "Choice 3 out of range (2 available)");
    }

    #[test]
    fn roster_parse_error_keeps_source() {
        let parse_error = toml::from_str::<toml::Value>("[[npc").expect_err("broken toml");
        let error = RosterError::from(parse_error);
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().starts_with("Roster parse error"));

        let invalid = RosterError::InvalidQuestion {
            npc: "Max".to_string(),
            index: 0,
            reason: "expected 2 choices".to_string(),
        };
        assert!(std::error::Error::source(&invalid).is_none());
        assert!(invalid.to_string().contains("Question 1 for Max"));
    }
}
