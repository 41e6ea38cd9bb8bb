use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::storage::normalize_to_png;
use crate::translate::TranslateRequest;

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
}

impl GenerateImageRequest {
    /// Extract the prompt text.
    ///
    /// JSON falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) count as a
    /// missing prompt; any other non-string value is a malformed body.
    pub fn prompt_text(self) -> Result<String, AppError> {
        match self.prompt {
            Some(Value::String(p)) if !p.is_empty() => Ok(p),
            None | Some(Value::Null) | Some(Value::String(_)) | Some(Value::Bool(false)) => {
                Err(AppError::missing_prompt())
            }
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(AppError::missing_prompt()),
            Some(Value::Array(a)) if a.is_empty() => Err(AppError::missing_prompt()),
            Some(Value::Object(o)) if o.is_empty() => Err(AppError::missing_prompt()),
            Some(other) => Err(AppError::InvalidBody(format!(
                "'prompt' must be a string, got {}",
                other
            ))),
        }
    }
}

pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Response {
    let debug = state.config.system.debug;
    match run_generation(&state, payload).await {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(err) => err.into_response_with(debug),
    }
}

async fn run_generation(
    state: &AppState,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Vec<u8>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

    let prompt = request.prompt_text()?;

    let translate_config = &state.config.translate;
    let translated = state
        .translator
        .translate(TranslateRequest {
            text: prompt,
            source_lang: translate_config.source_lang.clone(),
            target_lang: translate_config.target_lang.clone(),
        })
        .await
        .map_err(|e| AppError::Translation(format!("{:#}", e)))?;
    info!("Translated prompt: {}", translated.translated_text);

    let generated = state
        .image_generator
        .generate(&translated.translated_text)
        .await?;
    debug!(
        "{} returned {} bytes ({})",
        state.image_generator.name(),
        generated.data.len(),
        generated.content_type.as_deref().unwrap_or("unknown type")
    );

    let png = normalize_to_png(&generated.data)?;
    if let Some(path) = state.image_store.save(&png).await? {
        info!("Generated image stored at {}", path.display());
    }

    Ok(png)
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "translator": state.translator.name(),
        "image_generator": state.image_generator.name(),
    }))
}
