use std::sync::Arc;

use super::{config::Config, gemini::GeminiClient};

pub struct State {
    pub config: Config,
    pub gemini: GeminiClient,
}

impl State {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        let gemini = GeminiClient::new(config.gemini_url.clone(), config.gemini_key.clone());

        Arc::new(Self { config, gemini })
    }
}
