use crate::model::GenerationParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub document: Document,
    #[serde(default)]
    pub extraction: Extraction,
    #[serde(default)]
    pub model: Model,
    #[serde(default)]
    pub generation: Generation,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Loads `path` when given, otherwise falls back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.document
            .supported_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub title: String,
    pub description: String,
}
impl Default for App {
    fn default() -> Self {
        Self {
            title: "Document Assistant".into(),
            description: "Upload a document and analyze it through summaries, questions, or comprehension tests.".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub supported_extensions: Vec<String>,
    pub max_chunk_size: usize,
    pub preview_chars: usize,
    pub max_file_bytes: u64,
}
impl Default for Document {
    fn default() -> Self {
        Self {
            supported_extensions: vec!["pdf".into(), "txt".into()],
            max_chunk_size: 3000,
            preview_chars: 4000,
            max_file_bytes: 200 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub normalize_unicode: bool,
    pub normalize_newlines: bool,
    pub trim_trailing_whitespace: bool,
}
impl Default for Extraction {
    fn default() -> Self {
        Self {
            normalize_unicode: false,
            normalize_newlines: true,
            trim_trailing_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub provider: String,
    pub name: String,
    pub base_url: String,
    pub api_key_env: String,
    pub timeout_seconds: u64,
}
impl Default for Model {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            name: "gemini-2.0-flash-exp".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key_env: "GOOGLE_API_KEY".into(),
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    #[serde(default = "summary_params")]
    pub summary: GenerationParams,
    #[serde(default = "question_params")]
    pub question: GenerationParams,
    #[serde(default = "challenge_params")]
    pub challenge: GenerationParams,
    #[serde(default = "evaluation_params")]
    pub evaluation: GenerationParams,
}
impl Default for Generation {
    fn default() -> Self {
        Self {
            summary: summary_params(),
            question: question_params(),
            challenge: challenge_params(),
            evaluation: evaluation_params(),
        }
    }
}

fn summary_params() -> GenerationParams {
    GenerationParams::new(0.3, 200)
}

fn question_params() -> GenerationParams {
    GenerationParams::new(0.2, 500)
}

fn challenge_params() -> GenerationParams {
    GenerationParams::new(0.5, 800)
}

fn evaluation_params() -> GenerationParams {
    GenerationParams::new(0.3, 600)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            write_to_file: false,
            file_path: "doc-assistant.log".into(),
        }
    }
}
