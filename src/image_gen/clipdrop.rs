use std::time::Duration;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{multipart, Client};
use tracing::{debug, info};

use crate::config::ImageGenConfig;
use super::interface::{GeneratedImage, ImageGenError, ImageGenerator};

const API_KEY_HEADER: &str = "x-api-key";
const REMAINING_CREDITS_HEADER: &str = "x-remaining-credits";
const CREDITS_CONSUMED_HEADER: &str = "x-credits-consumed";

/// Client for the Clipdrop text-to-image API
pub struct ClipdropClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ClipdropClient {
    pub fn new(client: Client, api_url: String, api_key: String) -> Self {
        info!("Initialized ClipdropClient: api_url={}", api_url);
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Build a client from configuration, applying the optional request timeout
    pub fn from_config(config: &ImageGenConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self::new(client, config.api_url.clone(), config.api_key.clone()))
    }
}

#[async_trait]
impl ImageGenerator for ClipdropClient {
    fn name(&self) -> &str {
        "clipdrop"
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageGenError> {
        let part = multipart::Part::text(prompt.to_string()).mime_str("text/plain")?;
        let form = multipart::Form::new().part("prompt", part);

        debug!("Sending image generation request to {}", self.api_url);
        let response = self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageGenError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let headers = response.headers();
        let header_str = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        if let (Some(remaining), Some(consumed)) = (
            header_str(REMAINING_CREDITS_HEADER),
            header_str(CREDITS_CONSUMED_HEADER),
        ) {
            info!("Clipdrop credits consumed={} remaining={}", consumed, remaining);
        }
        let content_type = header_str(reqwest::header::CONTENT_TYPE.as_str());

        let data = response.bytes().await?.to_vec();
        debug!("Received {} bytes of image data", data.len());

        Ok(GeneratedImage { data, content_type })
    }
}
