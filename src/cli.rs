use crate::{
    assistant::Assistant,
    chunker,
    config::Config,
    extract::{self, Document},
    model::{self, Model},
    render,
    session::Session,
    util::{ensure_dir, now_rfc3339},
};
use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "doc-assistant.toml";

#[derive(Parser, Debug)]
#[command(name = "doc-assistant")]
#[command(about = "Summaries, Q&A and comprehension challenges over a PDF or text file")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./doc-assistant.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Doctor {},
    Extract {
        #[arg(long)]
        input: PathBuf,
    },
    Chunk {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        max_chunk_size: Option<usize>,
    },
    Summary {
        #[arg(long)]
        input: PathBuf,
    },
    Ask {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        question: String,
    },
    Challenge {
        #[arg(long)]
        input: PathBuf,
    },
    /// Interactive loop over stdin.
    Session {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let _ = dotenvy::dotenv();
    let cfg_path = resolve_config_path(args.config.as_deref());
    let cfg = Config::load_or_default(cfg_path.as_deref())?;
    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg, cfg_path.as_deref()),
        Command::Extract { input } => extract_cmd(&cfg, input),
        Command::Chunk {
            input,
            max_chunk_size,
        } => chunk_cmd(&cfg, input, *max_chunk_size),
        Command::Summary { input } => {
            let doc = extract::extract_document(&cfg, input)?;
            let assistant = Assistant::new(&cfg, model::from_config(&cfg)?);
            println!("{}", assistant.summarize(&doc)?);
            Ok(())
        }
        Command::Ask { input, question } => {
            let doc = extract::extract_document(&cfg, input)?;
            let assistant = Assistant::new(&cfg, model::from_config(&cfg)?);
            let mut session = Session::new();
            session.load_document(doc);
            let entry = session.ask(&assistant, question)?;
            println!("{}", entry.answer);
            Ok(())
        }
        Command::Challenge { input } => {
            let doc = extract::extract_document(&cfg, input)?;
            let assistant = Assistant::new(&cfg, model::from_config(&cfg)?);
            let questions = assistant.generate_challenge_questions(&doc)?;
            println!("{}", serde_json::to_string_pretty(&questions)?);
            Ok(())
        }
        Command::Session { input } => {
            let assistant = Assistant::new(&cfg, model::from_config(&cfg)?);
            let mut session = Session::new();
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}\n{}\n", cfg.app.title, cfg.app.description)?;
            if let Some(path) = input {
                load(&cfg, &mut session, path, &mut out)?;
            }
            run_session_loop(&cfg, &assistant, &mut session, stdin.lock(), &mut out)
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from(DEFAULT_CONFIG);
    if default.exists() { Some(default) } else { None }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if cfg.logging.write_to_file && !cfg.logging.file_path.is_empty() {
        let path = Path::new(&cfg.logging.file_path);
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor(cfg: &Config, cfg_path: Option<&Path>) -> Result<()> {
    let key_set = std::env::var(&cfg.model.api_key_env)
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);
    if !key_set {
        warn!("{} is not set; model commands will fail", cfg.model.api_key_env);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "config": cfg_path.map(|p| p.display().to_string()),
            "provider": cfg.model.provider,
            "model": cfg.model.name,
            "base_url": cfg.model.base_url,
            "api_key_env": cfg.model.api_key_env,
            "api_key_set": key_set,
            "supported_extensions": cfg.document.supported_extensions,
            "max_chunk_size": cfg.document.max_chunk_size,
            "preview_chars": cfg.document.preview_chars,
            "checked_at": now_rfc3339(),
            "ok": key_set,
        }))?
    );
    Ok(())
}

fn extract_cmd(cfg: &Config, input: &Path) -> Result<()> {
    let doc = extract::extract_document(cfg, input)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "input": input,
            "kind": doc.kind,
            "mime": doc.kind.mime(),
            "chars": doc.char_count(),
            "words": doc.text.split_whitespace().count(),
            "fingerprint": doc.fingerprint,
        }))?
    );
    Ok(())
}

fn chunk_cmd(cfg: &Config, input: &Path, max_chunk_size: Option<usize>) -> Result<()> {
    let doc = extract::extract_document(cfg, input)?;
    let max = max_chunk_size.unwrap_or(cfg.document.max_chunk_size);
    let chunks = chunker::chunk(&doc.text, max);
    info!("chunked {} into {} chunks max={}", input.display(), chunks.len(), max);
    println!("{}", serde_json::to_string_pretty(&chunks)?);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Load(PathBuf),
    Summary,
    Ask(String),
    History,
    ClearHistory,
    Questions,
    NewQuestions,
    Answer { id: i64, text: String },
    Progress,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };
        let cmd = match head.to_ascii_lowercase().as_str() {
            "load" => {
                if rest.is_empty() {
                    bail!("usage: load <path>");
                }
                SessionCommand::Load(PathBuf::from(rest))
            }
            "summary" => SessionCommand::Summary,
            "ask" => SessionCommand::Ask(rest.to_string()),
            "history" => SessionCommand::History,
            "clear-history" => SessionCommand::ClearHistory,
            "questions" => SessionCommand::Questions,
            "new-questions" => SessionCommand::NewQuestions,
            "answer" => {
                let (id, text) = rest
                    .split_once(char::is_whitespace)
                    .map(|(i, t)| (i, t.trim()))
                    .unwrap_or((rest, ""));
                let id = id
                    .parse::<i64>()
                    .map_err(|_| anyhow!("usage: answer <id> <text>"))?;
                SessionCommand::Answer {
                    id,
                    text: text.to_string(),
                }
            }
            "progress" => SessionCommand::Progress,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => bail!("unknown command: {other} (try 'help')"),
        };
        Ok(cmd)
    }
}

const HELP: &str = "\
Commands:
  load <path>          load a PDF or TXT file
  summary              summarize the document
  ask <question>       ask about the document
  history              show the last 5 questions
  clear-history        forget previous questions
  questions            generate challenge questions
  new-questions        discard the current challenge
  answer <id> <text>   submit an answer for grading
  progress             show challenge progress
  quit                 leave
";

/// Reads commands until EOF or `quit`. Action errors are printed and the loop
/// carries on; only I/O failures on `output` end it early.
pub fn run_session_loop<M: Model, R: BufRead, W: Write>(
    cfg: &Config,
    assistant: &Assistant<M>,
    session: &mut Session,
    input: R,
    output: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line.with_context(|| "reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match SessionCommand::parse(&line) {
            Ok(cmd) => cmd,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        if cmd == SessionCommand::Quit {
            break;
        }
        if let Err(err) = handle(cfg, assistant, session, cmd, output) {
            warn!("{:#}", err);
            writeln!(output, "Error: {err:#}")?;
        }
    }
    Ok(())
}

fn handle<M: Model, W: Write>(
    cfg: &Config,
    assistant: &Assistant<M>,
    session: &mut Session,
    cmd: SessionCommand,
    out: &mut W,
) -> Result<()> {
    match cmd {
        SessionCommand::Load(path) => load(cfg, session, &path, out)?,
        SessionCommand::Summary => {
            let summary = session.summarize(assistant)?;
            writeln!(out, "Document Summary\n{summary}")?;
        }
        SessionCommand::Ask(question) => {
            let entry = session.ask(assistant, &question)?;
            writeln!(out, "{}", entry.answer)?;
        }
        SessionCommand::History => write!(out, "{}", render::history(session))?,
        SessionCommand::ClearHistory => {
            session.clear_history();
            writeln!(out, "History cleared")?;
        }
        SessionCommand::Questions => {
            session.generate_questions(assistant)?;
            writeln!(out, "Questions generated")?;
            write!(out, "{}", render::challenge(session))?;
        }
        SessionCommand::NewQuestions => {
            session.clear_questions();
            write!(out, "{}", render::challenge(session))?;
        }
        SessionCommand::Answer { id, text } => {
            let eval = session.submit_answer(assistant, id, &text)?;
            write!(out, "{}", render::evaluation(eval))?;
            if let Some(line) = render::progress(session) {
                write!(out, "{line}")?;
            }
        }
        SessionCommand::Progress => match render::progress(session) {
            Some(line) => write!(out, "{line}")?,
            None => write!(out, "{}", render::challenge(session))?,
        },
        SessionCommand::Help => write!(out, "{HELP}")?,
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn load<W: Write>(cfg: &Config, session: &mut Session, path: &Path, out: &mut W) -> Result<()> {
    let doc: Document = extract::extract_document(cfg, path)?;
    writeln!(
        out,
        "Document processed successfully. Length: {} characters",
        doc.char_count()
    )?;
    session.load_document(doc);
    Ok(())
}
