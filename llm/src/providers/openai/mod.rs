pub mod chat;
pub mod provider;

pub use chat::OpenAIChatModel;
pub use provider::{DEFAULT_GROQ_MODEL, GROQ_BASE_URL, OpenAIProvider};
