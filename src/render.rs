use crate::{
    interpret::{ChallengeQuestion, ScoreBand},
    session::{ChatEntry, Evaluation, Session},
    util::truncate_chars,
};
use std::fmt::Write;

pub const HISTORY_SHOWN: usize = 5;
pub const HISTORY_ANSWER_CHARS: usize = 200;

pub fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Positive => "[good]",
        ScoreBand::Neutral => "[fair]",
        ScoreBand::Caution => "[weak]",
        ScoreBand::Negative => "[poor]",
    }
}

pub fn question(index: usize, q: &ChallengeQuestion) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Question {} ({} - {}) [id {}]",
        index + 1,
        q.kind,
        q.difficulty,
        q.id
    );
    let _ = writeln!(out, "{}", q.question);
    if let Some(hint) = &q.hint {
        let _ = writeln!(out, "Hint: {hint}");
    }
    out
}

pub fn evaluation(eval: &Evaluation) -> String {
    format!(
        "Evaluation:\n{} Score: {}/10\n\n{}\n",
        band_label(eval.band()),
        eval.score(),
        eval.text
    )
}

pub fn chat_entry(entry: &ChatEntry) -> String {
    format!(
        "[{}] Q: {}\nA: {}...\n",
        entry.timestamp,
        entry.question,
        truncate_chars(&entry.answer, HISTORY_ANSWER_CHARS)
    )
}

pub fn history(session: &Session) -> String {
    let recent = session.recent_history(HISTORY_SHOWN);
    if recent.is_empty() {
        return "No previous questions.\n".to_string();
    }
    let mut out = String::from("Previous Questions\n");
    for entry in recent {
        out.push_str(&chat_entry(entry));
        out.push_str("---\n");
    }
    out
}

pub fn challenge(session: &Session) -> String {
    if session.questions().is_empty() {
        return "Run 'questions' to generate the challenge.\n".to_string();
    }
    let mut out = String::from("Answer the following questions based on the document:\n\n");
    for (i, q) in session.questions().iter().enumerate() {
        out.push_str(&question(i, q));
        if let Some(eval) = session.evaluation(q.id) {
            out.push_str(&evaluation(eval));
        }
        out.push_str("---\n");
    }
    if let Some(line) = progress(session) {
        out.push_str(&line);
    }
    out
}

/// Shown once at least one answer has been graded.
pub fn progress(session: &Session) -> Option<String> {
    let (answered, total) = session.progress();
    if answered == 0 {
        return None;
    }
    Some(format!("Progress: {answered}/{total} questions answered\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_cuts_long_answers() {
        let mut session = Session::new();
        session.push_chat("q".into(), "x".repeat(500));
        let out = history(&session);
        assert!(out.contains(&format!("A: {}...", "x".repeat(200))));
        assert!(!out.contains(&"x".repeat(201)));
    }

    #[test]
    fn empty_challenge_prompts_generation() {
        let session = Session::new();
        assert!(challenge(&session).contains("questions"));
        assert!(progress(&session).is_none());
    }

    #[test]
    fn score_line_carries_band() {
        let eval = Evaluation {
            question_id: 1,
            text: "Score: 4\nFeedback: meh".into(),
        };
        assert!(evaluation(&eval).contains("[weak] Score: 4/10"));
    }
}
