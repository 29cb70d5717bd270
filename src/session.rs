use crate::{
    assistant::Assistant,
    extract::Document,
    interpret::{self, ChallengeQuestion, ScoreBand},
    model::Model,
    util::clock_hms,
};
use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub question: String,
    pub answer: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub question_id: i64,
    pub text: String,
}

impl Evaluation {
    pub fn score(&self) -> i64 {
        interpret::extract_score(&self.text)
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score())
    }
}

/// Everything one user accumulates while working with a document.
///
/// Answers and evaluations are keyed by question id so a regenerated list
/// can never pair an old evaluation with a new question.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
    chat_history: Vec<ChatEntry>,
    questions: Vec<ChallengeQuestion>,
    answers: BTreeMap<i64, String>,
    evaluations: BTreeMap<i64, Evaluation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_document(&mut self, doc: Document) {
        info!(
            "session document replaced path={} chars={}",
            doc.path.display(),
            doc.char_count()
        );
        self.document = Some(doc);
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn require_document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| anyhow!("no document loaded"))
    }

    pub fn summarize<M: Model>(&self, assistant: &Assistant<M>) -> Result<String> {
        assistant.summarize(self.require_document()?)
    }

    pub fn ask<M: Model>(&mut self, assistant: &Assistant<M>, question: &str) -> Result<&ChatEntry> {
        if question.trim().is_empty() {
            bail!("Please enter a question");
        }
        let answer = assistant.answer_question(self.require_document()?, question)?;
        Ok(self.push_chat(question.to_string(), answer))
    }

    pub fn push_chat(&mut self, question: String, answer: String) -> &ChatEntry {
        self.chat_history.push(ChatEntry {
            question,
            answer,
            timestamp: clock_hms(),
        });
        &self.chat_history[self.chat_history.len() - 1]
    }

    pub fn chat_history(&self) -> &[ChatEntry] {
        &self.chat_history
    }

    /// Last `n` entries, newest first.
    pub fn recent_history(&self, n: usize) -> Vec<&ChatEntry> {
        self.chat_history.iter().rev().take(n).collect()
    }

    pub fn clear_history(&mut self) {
        self.chat_history.clear();
    }

    pub fn generate_questions<M: Model>(&mut self, assistant: &Assistant<M>) -> Result<&[ChallengeQuestion]> {
        let questions = assistant.generate_challenge_questions(self.require_document()?)?;
        self.replace_questions(questions);
        Ok(&self.questions)
    }

    /// Installs a new question list and drops answers and evaluations.
    /// Ids that are not unique are replaced by positions `1..=n` so each
    /// answer lands on exactly one question.
    pub fn replace_questions(&mut self, mut questions: Vec<ChallengeQuestion>) {
        let distinct: BTreeSet<i64> = questions.iter().map(|q| q.id).collect();
        if distinct.len() != questions.len() {
            warn!(count = questions.len(), "duplicate question ids; renumbering by position");
            for (pos, q) in (1..).zip(questions.iter_mut()) {
                q.id = pos;
            }
        }
        self.questions = questions;
        self.answers.clear();
        self.evaluations.clear();
    }

    pub fn clear_questions(&mut self) {
        self.replace_questions(Vec::new());
    }

    pub fn questions(&self) -> &[ChallengeQuestion] {
        &self.questions
    }

    pub fn question(&self, id: i64) -> Option<&ChallengeQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Records the answer, then asks the model to grade it. The answer stays
    /// recorded even when grading fails.
    pub fn submit_answer<M: Model>(
        &mut self,
        assistant: &Assistant<M>,
        id: i64,
        answer: &str,
    ) -> Result<&Evaluation> {
        if answer.trim().is_empty() {
            bail!("Please provide an answer");
        }
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| anyhow!("no document loaded"))?;
        let question = self
            .question(id)
            .ok_or_else(|| anyhow!("no question with id {id}"))?
            .question
            .clone();

        self.answers.insert(id, answer.to_string());
        let text = assistant.evaluate_answer(doc, &question, answer)?;
        let eval = Evaluation {
            question_id: id,
            text,
        };
        info!("question {id} evaluated score={}", eval.score());
        self.evaluations.insert(id, eval);
        self.evaluations
            .get(&id)
            .ok_or_else(|| anyhow!("evaluation for question {id} missing after insert"))
    }

    pub fn answer(&self, id: i64) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    pub fn evaluation(&self, id: i64) -> Option<&Evaluation> {
        self.evaluations.get(&id)
    }

    /// `(evaluated, total)` over the current question list.
    pub fn progress(&self) -> (usize, usize) {
        (self.evaluations.len(), self.questions.len())
    }
}
