use std::sync::Arc;
use reqwest::Client;

use crate::config::Config;
use crate::image_gen::{ClipdropClient, ImageGenerator};
use crate::storage::ImageStore;
use crate::translate::{Translator, TranslatorFactory};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub translator: Arc<dyn Translator>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub image_store: ImageStore,
}

impl AppState {
    /// Build the state with the collaborators named in the configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = TranslatorFactory::create_translator(&config.translate, Client::new())?;
        let image_generator: Arc<dyn ImageGenerator> =
            Arc::new(ClipdropClient::from_config(&config.image_gen)?);

        Ok(Self::with_collaborators(config, translator, image_generator))
    }

    pub fn with_collaborators(
        config: Config,
        translator: Arc<dyn Translator>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        let image_store = ImageStore::from_config(&config.storage);
        Self {
            config,
            translator,
            image_generator,
            image_store,
        }
    }
}
