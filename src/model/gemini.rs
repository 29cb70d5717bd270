use super::{
    GenerationParams, Model,
    types::{Content, ErrorBody, GenerateRequest, GenerateResponse, GenerationConfig, Part},
};
use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub struct GeminiModel {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiModel {
    pub fn new(cfg: &Config) -> Result<Self> {
        let api_key = std::env::var(&cfg.model.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("missing API key: set {}", cfg.model.api_key_env))?;
        Self::with_api_key(cfg, api_key)
    }

    pub fn with_api_key(cfg: &Config, api_key: String) -> Result<Self> {
        let mut builder = Client::builder();
        if cfg.model.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(cfg.model.timeout_seconds));
        }
        let client = builder.build().with_context(|| "building HTTP client")?;
        Ok(Self {
            client,
            base_url: cfg.model.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.name.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn call(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let req = build_request(prompt, params);
        debug!(
            "gemini request model={} prompt_chars={} temperature={} max_tokens={}",
            self.model,
            prompt.chars().count(),
            params.temperature,
            params.max_tokens
        );

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .with_context(|| "sending request")?;

        let status = resp.status();
        let body = resp.text().with_context(|| "reading response body")?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(anyhow!("HTTP {status}: {}", detail.trim()));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).with_context(|| "parsing generateContent response")?;
        response_text(&parsed)
    }
}

impl Model for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.call(prompt, params)
            .map_err(|e| anyhow!("Error generating content: {e:#}"))
    }
}

pub fn build_request(prompt: &str, params: &GenerationParams) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part {
                text: Some(prompt.to_string()),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
        },
    }
}

pub fn response_text(resp: &GenerateResponse) -> Result<String> {
    if let Some(text) = resp.text() {
        return Ok(text);
    }
    if let Some(reason) = resp
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(anyhow!("prompt blocked: {reason}"));
    }
    let finish = resp
        .candidates
        .first()
        .and_then(|c| c.finish_reason.clone())
        .unwrap_or_else(|| "none".into());
    warn!("gemini returned no text; finish_reason={finish}");
    Err(anyhow!("response contained no text (finish_reason={finish})"))
}
