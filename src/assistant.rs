use crate::{
    config::Config,
    extract::Document,
    interpret::{self, ChallengeQuestion},
    model::{GenerationParams, Model},
    prompts,
};
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Binds a model to the four prompt modes.
pub struct Assistant<M: Model> {
    cfg: Config,
    model: M,
}

impl<M: Model> Assistant<M> {
    pub fn new(cfg: &Config, model: M) -> Self {
        Self {
            cfg: cfg.clone(),
            model,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn summarize(&self, doc: &Document) -> Result<String> {
        let prompt = prompts::summary_prompt(&doc.text, self.cfg.document.preview_chars);
        self.run("summary", &prompt, &self.cfg.generation.summary)
    }

    pub fn answer_question(&self, doc: &Document, question: &str) -> Result<String> {
        let prompt = prompts::question_prompt(&doc.text, question);
        self.run("question", &prompt, &self.cfg.generation.question)
    }

    /// Never fails on unusable model output; only on the model call itself.
    pub fn generate_challenge_questions(&self, doc: &Document) -> Result<Vec<ChallengeQuestion>> {
        let prompt = prompts::challenge_prompt(&doc.text, self.cfg.document.preview_chars);
        let raw = self.run("challenge", &prompt, &self.cfg.generation.challenge)?;
        let questions = interpret::parse_questions(&raw);
        info!("challenge questions ready count={}", questions.len());
        Ok(questions)
    }

    pub fn evaluate_answer(&self, doc: &Document, question: &str, answer: &str) -> Result<String> {
        let prompt = prompts::evaluation_prompt(&doc.text, question, answer);
        self.run("evaluation", &prompt, &self.cfg.generation.evaluation)
    }

    fn run(&self, mode: &str, prompt: &str, params: &GenerationParams) -> Result<String> {
        let started = Instant::now();
        info!(
            "mode={mode} model={} prompt_chars={} temperature={} max_tokens={}",
            self.model.name(),
            prompt.chars().count(),
            params.temperature,
            params.max_tokens
        );
        let out = self.model.generate(prompt, params)?;
        debug!(
            "mode={mode} response_chars={} elapsed_ms={}",
            out.chars().count(),
            started.elapsed().as_millis()
        );
        Ok(out)
    }
}
