use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::interface::{TranslateRequest, TranslateResponse, Translator};

/// Translator backed by the public Google Translate web endpoint
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, anyhow::Error> {
        let url = format!("{}/translate_a/single", self.base_url);
        debug!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            request.source_lang,
            request.target_lang
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_lang.as_str()),
                ("tl", request.target_lang.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("translation service returned {}: {}", status, body);
        }

        let payload: Value = response.json().await?;
        let translated_text = parse_translation(&payload)?;
        Ok(TranslateResponse { translated_text })
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The payload looks like `[[["Hello ", "Xin chào ", ...], ["world", "thế giới", ...]], ...]`.
pub fn parse_translation(payload: &Value) -> anyhow::Result<String> {
    let segments = payload
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow::anyhow!("unexpected translation response shape"))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if text.trim().is_empty() {
        anyhow::bail!("translation service returned an empty translation");
    }
    Ok(text)
}
