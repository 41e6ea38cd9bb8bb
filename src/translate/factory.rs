use std::sync::Arc;
use anyhow::Result;
use reqwest::Client;
use tracing::info;

use crate::config::TranslateConfig;
use super::google::GoogleTranslator;
use super::interface::Translator;
use super::passthrough::PassthroughTranslator;

/// Engine names accepted in `translate.engine`
pub const KNOWN_ENGINES: &[&str] = &["google", "passthrough", "none"];

/// Factory for creating translators
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn is_known_engine(engine: &str) -> bool {
        KNOWN_ENGINES.contains(&engine)
    }

    /// Create a translator based on configuration
    ///
    /// # Arguments
    /// * `config` - Translation section of the service configuration
    /// * `client` - Shared HTTP client for outbound calls
    pub fn create_translator(
        config: &TranslateConfig,
        client: Client,
    ) -> Result<Arc<dyn Translator>> {
        info!(
            "Initializing translator: {} ({} -> {})",
            config.engine, config.source_lang, config.target_lang
        );

        match config.engine.as_str() {
            "google" => Ok(Arc::new(GoogleTranslator::new(client, config.base_url.clone()))),
            "passthrough" | "none" => Ok(Arc::new(PassthroughTranslator)),
            other => anyhow::bail!("Unknown translate engine: {}", other),
        }
    }
}
