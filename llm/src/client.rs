use reqwest::header::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{Level, event, instrument};

use crate::error::{ProviderError, ProviderResult};

#[derive(Clone, Debug)]
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn with_headers(headers: HeaderMap) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::Other(anyhow::Error::new(e)))?;
        Ok(Client { client })
    }

    #[instrument(level = "trace", skip(self, request), fields(json_request = serde_json::to_string(request).unwrap_or_default()))]
    pub async fn post<U, S, T>(&self, url: U, request: &S) -> ProviderResult<T>
    where
        U: reqwest::IntoUrl + std::fmt::Debug,
        S: Serialize + Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            event!(Level::WARN, %status, response = text);
            return Err(ProviderError::from_status(status, text));
        }
        event!(Level::TRACE, response = text);

        Ok(serde_json::from_str::<T>(&text)?)
    }
}
