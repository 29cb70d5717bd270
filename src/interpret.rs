use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Score:\s*([0-9]+)").expect("score pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    Comprehension,
    Analysis,
    Synthesis,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Medium,
    Hard,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeQuestion {
    pub id: i64,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Comprehension => f.write_str("Comprehension"),
            QuestionType::Analysis => f.write_str("Analysis"),
            QuestionType::Synthesis => f.write_str("Synthesis"),
            QuestionType::Other(s) => f.write_str(s),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Medium => f.write_str("Medium"),
            Difficulty::Hard => f.write_str("Hard"),
            Difficulty::Other(s) => f.write_str(s),
        }
    }
}

/// Pulls the question list out of a model response.
///
/// The payload is the span from the first `[` to the last `]`. Anything that
/// fails to decode as a question list yields [`fallback_questions`].
pub fn parse_questions(response: &str) -> Vec<ChallengeQuestion> {
    let Some(payload) = bracket_span(response) else {
        debug!("no bracketed payload in response; using fallback questions");
        return fallback_questions();
    };

    match serde_json::from_str::<Vec<ChallengeQuestion>>(payload) {
        Ok(questions) => questions,
        Err(err) => {
            debug!("question payload did not decode ({err}); using fallback questions");
            fallback_questions()
        }
    }
}

fn bracket_span(s: &str) -> Option<&str> {
    let start = s.find('[')?;
    let end = s.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&s[start..=end])
}

pub fn fallback_questions() -> Vec<ChallengeQuestion> {
    vec![
        ChallengeQuestion {
            id: 1,
            question: "What are the main themes or topics discussed in this document?".into(),
            kind: QuestionType::Comprehension,
            difficulty: Difficulty::Medium,
            hint: Some("Look for recurring concepts and main sections".into()),
        },
        ChallengeQuestion {
            id: 2,
            question: "How do the different parts of this document relate to each other?".into(),
            kind: QuestionType::Analysis,
            difficulty: Difficulty::Hard,
            hint: Some("Consider cause-effect relationships and logical flow".into()),
        },
        ChallengeQuestion {
            id: 3,
            question: "What conclusions can you draw from the information presented?".into(),
            kind: QuestionType::Synthesis,
            difficulty: Difficulty::Medium,
            hint: Some("Think about implications and broader meaning".into()),
        },
    ]
}

/// First `Score: N` in the text, unclamped. `0` when there is none.
///
/// Only ASCII digits count. A number too large for `i64` saturates at
/// `i64::MAX` so it still lands in the top band.
pub fn extract_score(text: &str) -> i64 {
    let Some(digits) = SCORE_RE.captures(text).and_then(|c| c.get(1)) else {
        return 0;
    };
    digits.as_str().parse().unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Positive,
    Neutral,
    Caution,
    Negative,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> Self {
        if score >= 8 {
            ScoreBand::Positive
        } else if score >= 6 {
            ScoreBand::Neutral
        } else if score >= 4 {
            ScoreBand::Caution
        } else {
            ScoreBand::Negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_span_is_greedy() {
        assert_eq!(bracket_span("x [1] y [2] z"), Some("[1] y [2]"));
        assert_eq!(bracket_span("] before ["), None);
        assert_eq!(bracket_span("nothing"), None);
    }
}
