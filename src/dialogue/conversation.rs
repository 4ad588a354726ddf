//! State machine for a single NPC conversation: question lines, choices, result.
use std::time::Duration;

use bevy::prelude::*;

use crate::{
    company::stats::describe_effects,
    dialogue::{errors::DialogueError, typewriter::Typewriter},
    npc::roster::{ChoiceDef, NpcDef},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStage {
    /// Showing question line `index`.
    Lines { index: usize },
    Choosing,
    Result,
}

/// What an advance input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStep {
    NextLine,
    ChoicesShown,
    /// Input while choices are up only nudges the choice cards.
    ChoicesPulsed,
    Finished,
}

#[derive(Resource, Debug, Clone)]
pub struct Conversation {
    npc: String,
    question_index: usize,
    lines: Vec<String>,
    choices: Vec<ChoiceDef>,
    stage: ConversationStage,
    typewriter: Typewriter,
    interval: Duration,
    pulses: u32,
}

impl Conversation {
    /// Opens question `question_index` of `npc`, addressed to `player_name`.
    pub fn begin(
        npc: &NpcDef,
        question_index: usize,
        player_name: &str,
        interval: Duration,
    ) -> Result<Self, DialogueError> {
        let question = npc
            .question(question_index)
            .ok_or_else(|| DialogueError::NoQuestionsLeft {
                npc: npc.name.clone(),
            })?;
        let mut lines = question.lines_for(player_name);
        if lines.is_empty() {
            lines.push(String::new());
        }
        let typewriter = Typewriter::new(lines[0].clone(), interval);

        Ok(Self {
            npc: npc.name.clone(),
            question_index,
            lines,
            choices: question.choices.clone(),
            stage: ConversationStage::Lines { index: 0 },
            typewriter,
            interval,
            pulses: 0,
        })
    }

    pub fn npc(&self) -> &str {
        &self.npc
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn stage(&self) -> ConversationStage {
        self.stage
    }

    pub fn choices(&self) -> &[ChoiceDef] {
        &self.choices
    }

    pub fn visible_text(&self) -> &str {
        self.typewriter.visible()
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.is_typing()
    }

    /// Times the player pressed advance while the choices were waiting.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    pub fn tick(&mut self, delta: Duration) -> bool {
        self.typewriter.tick(delta)
    }

    /// One-tap advance: completes the current line and moves on.
    pub fn advance(&mut self) -> ConversationStep {
        match self.stage {
            ConversationStage::Choosing => {
                self.pulses += 1;
                ConversationStep::ChoicesPulsed
            }
            ConversationStage::Lines { index } => {
                self.typewriter.finish();
                let next = index + 1;
                if next < self.lines.len() {
                    self.stage = ConversationStage::Lines { index: next };
                    self.typewriter = Typewriter::new(self.lines[next].clone(), self.interval);
                    ConversationStep::NextLine
                } else {
                    self.stage = ConversationStage::Choosing;
                    ConversationStep::ChoicesShown
                }
            }
            ConversationStage::Result => {
                self.typewriter.finish();
                ConversationStep::Finished
            }
        }
    }

    /// Picks choice `index` and switches to the result text.
    pub fn choose(&mut self, index: usize) -> Result<ChoiceDef, DialogueError> {
        if self.stage != ConversationStage::Choosing {
            return Err(DialogueError::NoChoicePending);
        }
        let choice = self
            .choices
            .get(index)
            .cloned()
            .ok_or(DialogueError::ChoiceOutOfRange {
                index,
                available: self.choices.len(),
            })?;

        let summary = format!(
            "{}: {}\n\nEffects: {}",
            self.npc,
            choice.result_text(),
            describe_effects(&choice.effects)
        );
        self.stage = ConversationStage::Result;
        self.typewriter = Typewriter::new(summary, self.interval);
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::roster::Roster;

    const STEP: Duration = Duration::from_millis(18);

    fn rick() -> NpcDef {
        let roster = Roster::embedded().expect("built-in roster parses");
        roster.npcs.get("Rick").expect("Rick exists").clone()
    }

    #[test]
    fn lines_lead_to_choices_then_result() {
        let npc = rick();
        let question = npc.question(0).expect("first question");
        let line_count = question.lines.len();
        let mut conversation = Conversation::begin(&npc, 0, "Ada", STEP).expect("opens");

        assert_eq!(conversation.stage(), ConversationStage::Lines { index: 0 });
        assert_eq!(conversation.visible_text(), "");
        for _ in 1..line_count {
            assert_eq!(conversation.advance(), ConversationStep::NextLine);
        }
        assert_eq!(conversation.advance(), ConversationStep::ChoicesShown);
        assert_eq!(conversation.advance(), ConversationStep::ChoicesPulsed);
        assert_eq!(conversation.pulses(), 1);

        let choice = conversation.choose(0).expect("first choice exists");
        assert_eq!(conversation.stage(), ConversationStage::Result);
        conversation.tick(Duration::from_secs(60));
        let text = conversation.visible_text().to_string();
        assert!(text.starts_with(&format!("Rick: {}", choice.result_text())));
        assert!(text.contains("\n\nEffects: "));
        assert_eq!(conversation.advance(), ConversationStep::Finished);
    }

    #[test]
    fn advance_while_typing_completes_the_line() {
        let npc = rick();
        let mut conversation = Conversation::begin(&npc, 0, "Ada", STEP).expect("opens");
        conversation.tick(STEP * 2);
        assert!(conversation.is_typing());
        conversation.advance();
        assert!(!matches!(
            conversation.stage(),
            ConversationStage::Lines { index: 0 }
        ));
    }

    #[test]
    fn player_name_is_substituted() {
        let npc = rick();
        let expected = npc.question(0).expect("first question").lines_for("Ada");
        let mut conversation = Conversation::begin(&npc, 0, "Ada", STEP).expect("opens");
        conversation.tick(Duration::from_secs(60));
        assert_eq!(conversation.visible_text(), expected[0]);
        assert!(!conversation.visible_text().contains("{player}"));
    }

    #[test]
    fn choices_are_validated() {
        let npc = rick();
        let mut conversation = Conversation::begin(&npc, 0, "Ada", STEP).expect("opens");
        assert_eq!(
            conversation.choose(0).map(|choice| choice.label),
            Err(DialogueError::NoChoicePending)
        );
        while conversation.advance() != ConversationStep::ChoicesShown {}
        let available = conversation.choices().len();
        assert_eq!(
            conversation.choose(9).map(|choice| choice.label),
            Err(DialogueError::ChoiceOutOfRange {
                index: 9,
                available
            })
        );
    }

    #[test]
    fn missing_question_is_rejected() {
        let npc = rick();
        let past_end = npc.questions.len();
        assert_eq!(
            Conversation::begin(&npc, past_end, "Ada", STEP).map(|c| c.question_index()),
            Err(DialogueError::NoQuestionsLeft {
                npc: "Rick".into()
            })
        );
    }
}
