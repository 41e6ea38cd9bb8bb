use async_trait::async_trait;
use tracing::debug;

use super::interface::{TranslateRequest, TranslateResponse, Translator};

/// Returns the prompt untouched, for deployments that receive English prompts
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, anyhow::Error> {
        debug!(
            "Passthrough translation {} -> {}",
            request.source_lang, request.target_lang
        );
        Ok(TranslateResponse {
            translated_text: request.text,
        })
    }
}
