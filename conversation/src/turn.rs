use chrono::{DateTime, Local};
use llm::Role;
use serde::{Deserialize, Serialize};

/// Identifier of a display turn, unique within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(pub u64);

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transcript entry as rendered by the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTurn {
    pub id: TurnId,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Local>,
    /// Assistant-role failure notice with no provider-side counterpart.
    #[serde(default)]
    pub is_error: bool,
}

impl DisplayTurn {
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// `HH:MM`, as shown under each bubble.
    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}
