use llm::ProviderError;
use thiserror::Error;

/// Prefix of inline failure notices in the transcript.
pub const ERROR_MARKER: &str = "❌";

/// Provider failures as the chat widget reports them.
///
/// The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("🔑 Clé API Groq invalide ou manquante. Veuillez vérifier votre clé API sur https://console.groq.com/")]
    Unauthorized,

    #[error("⚠️ Erreur de configuration API. Le serveur a rejeté la requête.")]
    RequestRejected,

    #[error("🌐 Erreur de connexion réseau. Vérifiez votre connexion Internet.")]
    Network,

    #[error("Aucune réponse reçue de l'assistant. Veuillez réessayer.")]
    Empty,

    /// The request was dropped before the provider answered.
    #[error("⏹️ Requête interrompue avant la réponse. Veuillez réessayer.")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl ChatError {
    pub fn classify(err: &ProviderError) -> Self {
        match err {
            ProviderError::Unauthorized(_) => ChatError::Unauthorized,
            ProviderError::RequestRejected { .. } => ChatError::RequestRejected,
            ProviderError::Network(_) => ChatError::Network,
            ProviderError::Empty => ChatError::Empty,
            ProviderError::Status { .. } | ProviderError::Decode(_) | ProviderError::Other(_) => {
                ChatError::Other(err.to_string())
            }
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Content of the inline assistant notice for this failure.
    pub fn notice(&self) -> String {
        format!("{} {}", ERROR_MARKER, self.user_message())
    }
}
