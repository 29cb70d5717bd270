pub mod gemini;
pub mod types;

use crate::config::Config;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

pub use gemini::GeminiModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// A hosted text-generation service. One blocking call per prompt.
pub trait Model {
    fn name(&self) -> &str;
    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        (**self).generate(prompt, params)
    }
}

pub fn from_config(cfg: &Config) -> Result<Box<dyn Model>> {
    match cfg.model.provider.to_ascii_lowercase().as_str() {
        "gemini" | "google" => Ok(Box::new(GeminiModel::new(cfg)?)),
        other => Err(anyhow!("unsupported model.provider: {other}")),
    }
}
