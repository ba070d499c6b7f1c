//! Chat session for the TimeTravel Agency concierge widget.
//!
//! - `ConversationStore`: display and provider transcripts kept in lockstep
//! - `ChatController`: the Idle/Pending request cycle over any `llm::ChatModel`
//! - `PersonaPrimer`: one-time persona grounding for the provider
//! - `ConciergeModel`: offline keyword responder built on the destination catalog
//!
//! # Example
//!
//! ```ignore
//! use conversation::ChatController;
//! use llm::providers::OpenAIProvider;
//!
//! let model = OpenAIProvider::groq(api_key.as_deref())
//!     .create_chat_model("llama-3.3-70b-versatile", Default::default());
//! let chat = ChatController::with_agency_persona(model);
//! chat.submit("Quel est le prix pour Florence ?").await;
//! ```
pub mod catalog;
pub mod concierge;
pub mod controller;
pub mod error;
pub mod persona;
pub mod store;
pub mod turn;

pub use catalog::{DESTINATIONS, Destination};
pub use concierge::ConciergeModel;
pub use controller::{ChatController, ChatStatus, IgnoreReason, Phase, SubmitOutcome};
pub use error::{ChatError, ERROR_MARKER};
pub use persona::{GREETING, PersonaPrimer};
pub use store::ConversationStore;
pub use turn::{DisplayTurn, TurnId};
