use async_trait::async_trait;
use thiserror::Error;

/// Raw bytes returned by an image generation service
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Error)]
pub enum ImageGenError {
    /// The service answered with a non-success status
    #[error("Request failed: {status}")]
    Upstream { status: u16, body: String },

    #[error("image generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Image generation interface trait
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Short name used in logs and the health endpoint
    fn name(&self) -> &str;

    /// Generate an image for an English prompt
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageGenError>;
}
