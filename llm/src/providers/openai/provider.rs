use crate::Sampling;
use crate::client::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::warn;

use super::chat::OpenAIChatModel;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Credentials and endpoint for an OpenAI-compatible API.
///
/// Construction never fails on a bad credential: a missing or malformed key
/// yields models whose first call reports `ProviderError::Unauthorized`.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Option<Client>,
    base_url: String,
}

impl OpenAIProvider {
    pub fn groq(api_key: Option<&str>) -> Self {
        Self::new(GROQ_BASE_URL, api_key)
    }

    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        let client = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .and_then(|key| Self::authorized_client(key));

        OpenAIProvider {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn authorized_client(api_key: &str) -> Option<Client> {
        let auth = match HeaderValue::from_str(&format!("Bearer {}", api_key)) {
            Ok(value) => value,
            Err(e) => {
                warn!("API key is not a valid header value: {}", e);
                return None;
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        match Client::with_headers(headers) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Failed to build HTTP client: {}", e);
                None
            }
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.client.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn create_chat_model(&self, model_name: &str, sampling: Sampling) -> OpenAIChatModel {
        OpenAIChatModel::new(
            self.client.clone(),
            self.base_url.clone(),
            model_name.to_string(),
            sampling,
        )
    }
}
