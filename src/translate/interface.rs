use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Translator interface - implementations call out to a translation service
#[async_trait]
pub trait Translator: Send + Sync {
    /// Short name used in logs and the health endpoint
    fn name(&self) -> &str;

    /// Translate `request.text` from `source_lang` to `target_lang`
    ///
    /// # Returns
    /// The translated text, or an error describing why the collaborator failed
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, anyhow::Error>;
}
