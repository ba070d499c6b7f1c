//! In-memory transcript of one chat session.
//!
//! The store keeps two parallel sequences: display turns for the widget and
//! provider turns replayed verbatim on every completion call. Both grow in
//! lockstep, except failure notices which only exist on the display side.

use chrono::Local;
use llm::{ChatMessage, Role};
use tokio::sync::mpsc;

use crate::turn::{DisplayTurn, TurnId};

#[derive(Debug)]
pub struct ConversationStore {
    display: Vec<DisplayTurn>,
    provider: Vec<ChatMessage>,
    next_id: u64,
    subscribers: Vec<mpsc::UnboundedSender<DisplayTurn>>,
}

impl ConversationStore {
    /// New store whose first turn is the assistant greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        let mut store = Self {
            display: Vec::new(),
            provider: Vec::new(),
            next_id: 1,
            subscribers: Vec::new(),
        };
        store.append(ChatMessage::assistant(greeting));
        store
    }

    /// Append one turn to both transcripts.
    pub fn append(&mut self, turn: ChatMessage) -> DisplayTurn {
        let display = self.push_display(turn.role, turn.content.clone(), false);
        self.provider.push(turn);
        display
    }

    pub fn append_user(&mut self, content: impl Into<String>) -> DisplayTurn {
        self.append(ChatMessage::user(content))
    }

    pub fn append_assistant(&mut self, content: impl Into<String>) -> DisplayTurn {
        self.append(ChatMessage::assistant(content))
    }

    /// Append an assistant-role failure notice to the display transcript only.
    pub fn append_notice(&mut self, content: impl Into<String>) -> DisplayTurn {
        self.push_display(Role::Assistant, content.into(), true)
    }

    fn push_display(&mut self, role: Role, content: String, is_error: bool) -> DisplayTurn {
        let turn = DisplayTurn {
            id: TurnId(self.next_id),
            role,
            content,
            created_at: Local::now(),
            is_error,
        };
        self.next_id += 1;
        self.display.push(turn.clone());
        self.subscribers.retain(|tx| tx.send(turn.clone()).is_ok());
        turn
    }

    /// Receive every turn appended from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DisplayTurn> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn snapshot(&self) -> Vec<DisplayTurn> {
        self.display.clone()
    }

    pub fn provider_snapshot(&self) -> Vec<ChatMessage> {
        self.provider.clone()
    }

    pub fn turns(&self) -> &[DisplayTurn] {
        &self.display
    }

    pub fn provider_turns(&self) -> &[ChatMessage] {
        &self.provider
    }

    pub fn last(&self) -> Option<&DisplayTurn> {
        self.display.last()
    }

    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn provider_len(&self) -> usize {
        self.provider.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}
