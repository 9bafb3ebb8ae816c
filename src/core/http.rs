use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Thin GET-only wrapper around a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Body of `url` as text. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        tracing::debug!("Response status: {}", response.status());
        let response = response.error_for_status()?;

        Ok(response.text().await?)
    }
}
