#![allow(dead_code)]

use anyhow::{Result, anyhow};
use doc_assistant::{
    extract::{Document, DocumentKind},
    model::{GenerationParams, Model},
};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays canned responses in order and records every call.
#[derive(Default)]
pub struct ScriptedModel {
    replies: RefCell<VecDeque<Result<String, String>>>,
    pub calls: RefCell<Vec<(String, GenerationParams)>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, msg: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(msg.to_string()));
        self
    }

    pub fn last_prompt(&self) -> String {
        self.calls
            .borrow()
            .last()
            .map(|(p, _)| p.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Model for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.calls.borrow_mut().push((prompt.to_string(), *params));
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(anyhow!("Error generating content: {msg}")),
            None => Err(anyhow!("Error generating content: no scripted reply")),
        }
    }
}

pub fn sample_doc() -> Document {
    Document::from_text(
        "notes.txt",
        DocumentKind::PlainText,
        "The study finds that sleep improves memory consolidation.".to_string(),
    )
}
