use async_trait::async_trait;
use std::sync::Arc;

pub mod api;
mod client;
pub mod error;
pub mod providers;
pub use api::*;
pub use error::{ProviderError, ProviderResult};

/// A completion provider: given the whole transcript, produce the next
/// assistant message.
#[async_trait]
pub trait ChatModel {
    async fn chat(&self, request: &ChatRequest) -> ProviderResult<ChatMessage>;
}

#[async_trait]
impl<M: ChatModel + Send + Sync + ?Sized> ChatModel for Arc<M> {
    async fn chat(&self, request: &ChatRequest) -> ProviderResult<ChatMessage> {
        (**self).chat(request).await
    }
}

#[async_trait]
impl<M: ChatModel + Send + Sync + ?Sized> ChatModel for Box<M> {
    async fn chat(&self, request: &ChatRequest) -> ProviderResult<ChatMessage> {
        (**self).chat(request).await
    }
}
