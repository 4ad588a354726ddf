//! Messages that drive conversations and founder visits.
use bevy::prelude::*;

/// The player asked to talk to an NPC.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct TalkRequested {
    pub npc: String,
}

/// Player input for the open conversation, from keys or the dialogue box.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationInput {
    Advance,
    Choose(usize),
}

/// A conversation finished and the dialogue box should close.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConversationClosed {
    pub npc: String,
}

/// The player dismissed the founder visit panel.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct FounderVisitDismissed;
