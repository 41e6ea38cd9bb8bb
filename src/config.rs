use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;

use crate::translate::TranslatorFactory;

/// Environment variable consulted when `image_gen.api_key` is left empty.
pub const API_KEY_ENV: &str = "CLIPDROP_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub image_gen: ImageGenConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// When set, 500 responses carry the underlying error message.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    #[serde(default = "default_translate_engine")]
    pub engine: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_translate_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenConfig {
    #[serde(default = "default_image_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_persist")]
    pub persist: bool,
    /// Upper bound on stored images; 0 disables pruning.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5123
}

fn default_translate_engine() -> String {
    "google".to_string()
}

fn default_source_lang() -> String {
    "vi".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_translate_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_image_api_url() -> String {
    "https://clipdrop-api.co/text-to-image/v1".to_string()
}

fn default_output_dir() -> String {
    "generated".to_string()
}

fn default_persist() -> bool {
    true
}

fn default_max_files() -> usize {
    100
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            engine: default_translate_engine(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            base_url: default_translate_base_url(),
        }
    }
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            api_url: default_image_api_url(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            persist: default_persist(),
            max_files: default_max_files(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse configuration text; the format is picked from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Fill the API key from the environment if the file left it blank or
    /// left an unresolved `${VAR}` placeholder.
    pub fn apply_env_fallbacks(&mut self) {
        let key = self.image_gen.api_key.trim();
        if key.is_empty() || key.starts_with("${") {
            if let Ok(from_env) = std::env::var(API_KEY_ENV) {
                self.image_gen.api_key = from_env;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let key = self.image_gen.api_key.trim();
        if key.is_empty() || key.starts_with("${") {
            anyhow::bail!(
                "Image generation API key is not set; configure image_gen.api_key or {}",
                API_KEY_ENV
            );
        }
        if self.translate.source_lang.trim().is_empty()
            || self.translate.target_lang.trim().is_empty()
        {
            anyhow::bail!("Translation language codes must not be empty");
        }
        if !TranslatorFactory::is_known_engine(&self.translate.engine) {
            anyhow::bail!("Unknown translate engine: {}", self.translate.engine);
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the variable's value, leaving unknown names as-is.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(p) => p,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
