#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
};
use image::{ImageBuffer, ImageFormat, Rgb};

use prompt_image_relay::config::Config;
use prompt_image_relay::image_gen::{GeneratedImage, ImageGenError, ImageGenerator};
use prompt_image_relay::translate::{TranslateRequest, TranslateResponse, Translator};

/// Encode a small solid-colour PNG whose colour is derived from `seed`.
pub fn png_for(seed: &str) -> Vec<u8> {
    let sum = seed.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let colour = Rgb([(sum & 0xff) as u8, ((sum >> 8) & 0xff) as u8, ((sum >> 16) & 0xff) as u8]);
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(3, 3, colour);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn test_config(output_dir: &std::path::Path, debug: bool) -> Config {
    let mut config = Config::default();
    config.system.debug = debug;
    config.image_gen.api_key = "test-key".to_string();
    config.storage.output_dir = output_dir.to_string_lossy().to_string();
    config
}

pub fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-image")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Shared call log so tests can assert ordering across collaborators
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub struct FakeTranslator {
    pub log: CallLog,
    pub requests: Mutex<Vec<TranslateRequest>>,
    pub fail_with: Option<String>,
}

impl FakeTranslator {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            requests: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(log: CallLog, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(log)
        }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, anyhow::Error> {
        self.log.lock().unwrap().push(format!("translate:{}", request.text));
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }
        Ok(TranslateResponse {
            translated_text: format!("en({})", request.text),
        })
    }
}

pub enum FakeImageBehaviour {
    /// Return `png_for(prompt)`, sleeping longer for shorter prompts
    PromptImage,
    Fixed(Vec<u8>),
    Upstream(u16, String),
}

pub struct FakeImageGenerator {
    pub log: CallLog,
    pub behaviour: FakeImageBehaviour,
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    fn name(&self) -> &str {
        "fake-images"
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageGenError> {
        self.log.lock().unwrap().push(format!("generate:{}", prompt));
        match &self.behaviour {
            FakeImageBehaviour::PromptImage => {
                let delay = 60u64.saturating_sub(prompt.len() as u64 * 2);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(GeneratedImage {
                    data: png_for(prompt),
                    content_type: Some("image/png".to_string()),
                })
            }
            FakeImageBehaviour::Fixed(data) => Ok(GeneratedImage {
                data: data.clone(),
                content_type: None,
            }),
            FakeImageBehaviour::Upstream(status, body) => Err(ImageGenError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
