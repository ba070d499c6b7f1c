use crate::api::{ChatMessage, ChatRequest, Role, Sampling};
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for Message {
    fn from(msg: &ChatMessage) -> Self {
        Message {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    pub fn from_request(model: String, request: &ChatRequest, sampling: Sampling) -> Self {
        ChatCompletionRequest {
            model,
            messages: request.messages.iter().map(|m| m.into()).collect(),
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatCompletionChoice {
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

impl TryFrom<ChatCompletionResponse> for ChatMessage {
    type Error = ProviderError;

    fn try_from(response: ChatCompletionResponse) -> Result<Self, Self::Error> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::Empty)?;

        Ok(ChatMessage::assistant(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_sampling_parameters() {
        let request = ChatRequest::new(vec![
            ChatMessage::assistant("Bonjour !"),
            ChatMessage::user("Quel est le prix pour Florence ?"),
        ]);
        let body = ChatCompletionRequest::from_request(
            "llama-3.3-70b-versatile".to_string(),
            &request,
            Sampling::default(),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 1024);
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(json["messages"][0]["role"], "assistant");
        assert_eq!(json["messages"][1]["content"], "Quel est le prix pour Florence ?");
    }

    #[test]
    fn test_first_choice_becomes_assistant_message() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1,
                "model": "llama-3.3-70b-versatile",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "15,800€ pour 6 jours."}, "finish_reason": "stop"}
                ]
            }"#,
        )
        .unwrap();

        let message = ChatMessage::try_from(response).unwrap();
        assert_eq!(message, ChatMessage::assistant("15,800€ pour 6 jours."));
    }

    #[test]
    fn test_missing_or_blank_content_is_empty() {
        let no_choices: ChatCompletionResponse =
            serde_json::from_str(r#"{"id": "x", "choices": []}"#).unwrap();
        assert!(matches!(ChatMessage::try_from(no_choices), Err(ProviderError::Empty)));

        let blank: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "  "}, "finish_reason": "stop"}]}"#,
        )
        .unwrap();
        assert!(matches!(ChatMessage::try_from(blank), Err(ProviderError::Empty)));

        let null_content: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": null}, "finish_reason": "length"}]}"#,
        )
        .unwrap();
        assert!(matches!(ChatMessage::try_from(null_content), Err(ProviderError::Empty)));
    }
}
