mod common;

use common::ScriptedModel;
use doc_assistant::{
    assistant::Assistant,
    cli::{SessionCommand, run_session_loop},
    config::Config,
    session::Session,
};
use std::path::PathBuf;

fn run(cfg: &Config, model: ScriptedModel, script: &str) -> (String, Session) {
    let assistant = Assistant::new(cfg, model);
    let mut session = Session::new();
    let mut out = Vec::new();
    run_session_loop(cfg, &assistant, &mut session, script.as_bytes(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), session)
}

#[test]
fn parses_commands() {
    assert_eq!(
        SessionCommand::parse("load  docs/a.pdf ").unwrap(),
        SessionCommand::Load(PathBuf::from("docs/a.pdf"))
    );
    assert_eq!(
        SessionCommand::parse("ask What is it?").unwrap(),
        SessionCommand::Ask("What is it?".into())
    );
    assert_eq!(
        SessionCommand::parse("answer 2 because reasons").unwrap(),
        SessionCommand::Answer {
            id: 2,
            text: "because reasons".into()
        }
    );
    assert_eq!(SessionCommand::parse("QUIT").unwrap(), SessionCommand::Quit);
    assert!(SessionCommand::parse("answer x y").is_err());
    assert!(SessionCommand::parse("load").is_err());
    assert!(SessionCommand::parse("dance").is_err());
}

#[test]
fn errors_do_not_end_the_loop() {
    let cfg = Config::default();
    let (out, _) = run(&cfg, ScriptedModel::new(), "summary\nbogus\nhelp\n");
    assert!(out.contains("Error: no document loaded"));
    assert!(out.contains("unknown command: bogus"));
    assert!(out.contains("Commands:"));
}

#[test]
fn full_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, "Rust guarantees memory safety without garbage collection.").unwrap();

    let model = ScriptedModel::new()
        .reply("A summary.")
        .reply("Answer: ownership.")
        .reply("not json at all")
        .reply("Score: 6\n\nFeedback: partial");
    let script = format!(
        "load {}\nsummary\nask How?\nhistory\nquestions\nanswer 2 it relates\nprogress\nquit\nsummary\n",
        path.display()
    );
    let cfg = Config::default();
    let (out, session) = run(&cfg, model, &script);

    assert!(out.contains("Document processed successfully. Length: 57 characters"));
    assert!(out.contains("A summary."));
    assert!(out.contains("Answer: ownership."));
    assert!(out.contains("Q: How?"));
    assert!(out.contains("Questions generated"));
    assert!(out.contains("Question 2 (Analysis - Hard)"));
    assert!(out.contains("Hint: Consider cause-effect relationships and logical flow"));
    assert!(out.contains("[fair] Score: 6/10"));
    assert!(out.contains("Progress: 1/3 questions answered"));

    assert_eq!(session.chat_history().len(), 1);
    assert_eq!(session.progress(), (1, 3));
}

#[test]
fn failed_load_keeps_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    std::fs::write(&good, "kept text").unwrap();
    let bad = dir.path().join("bad.csv");
    std::fs::write(&bad, "a,b").unwrap();

    let script = format!("load {}\nload {}\n", good.display(), bad.display());
    let (out, session) = run(&Config::default(), ScriptedModel::new(), &script);
    assert!(out.contains("Error: Unsupported file type"));
    assert_eq!(session.document().map(|d| d.text.as_str()), Some("kept text"));
}
