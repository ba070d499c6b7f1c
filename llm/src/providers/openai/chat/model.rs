use super::api::{ChatCompletionRequest, ChatCompletionResponse};
use crate::client::Client;
use crate::error::{ProviderError, ProviderResult};
use crate::{ChatMessage, ChatModel, ChatRequest, Sampling};
use async_trait::async_trait;
use tracing::instrument;

/// Chat model served by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone, Debug)]
pub struct OpenAIChatModel {
    // None when no usable API key was configured.
    client: Option<Client>,
    base_url: String,
    model_name: String,
    sampling: Sampling,
}

impl OpenAIChatModel {
    pub fn new(
        client: Option<Client>,
        base_url: String,
        model_name: String,
        sampling: Sampling,
    ) -> Self {
        OpenAIChatModel {
            client,
            base_url,
            model_name,
            sampling,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    #[instrument(level = "debug", skip(self, request), fields(model = %self.model_name, messages = request.len()))]
    async fn chat(&self, request: &ChatRequest) -> ProviderResult<ChatMessage> {
        let Some(client) = &self.client else {
            return Err(ProviderError::Unauthorized(
                "no API key configured".to_string(),
            ));
        };

        let body = ChatCompletionRequest::from_request(self.model_name.clone(), request, self.sampling);
        let response: ChatCompletionResponse = client.post(self.completions_url(), &body).await?;
        ChatMessage::try_from(response)
    }
}
