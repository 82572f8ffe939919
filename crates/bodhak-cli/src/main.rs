mod display;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use bodhak_ai::{PracticeFilter, sample_prompt};
use bodhak_core::catalog::{APP_NAME, TAGLINE};
use bodhak_core::document::mime_for_name;
use bodhak_core::{Catalog, Difficulty, ProgressSnapshot, QuestionType, UploadStatus};
use bodhak_session::{FileSubmission, Session, UploadEvent, UploadTimings, WELCOME};
use bodhak_store::{PreferenceStore, Theme};
use clap::{ArgAction, Parser, Subcommand};
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bodhak", version, about = "Bodhak AI: NEET & JEE practice in the terminal")]
struct Cli {
    /// Directory holding preferences.json
    #[arg(long, global = true, env = "BODHAK_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List exams with headline stats
    Exams,

    /// List subjects and topics
    Topics {
        #[arg(long)]
        exam: Option<String>,
        #[arg(long)]
        subject: Option<String>,
    },

    /// Generate a practice set
    Practice {
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        topic: Option<String>,
        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// mcq, numerical or theory
        #[arg(long = "type")]
        kind: Option<QuestionType>,
        #[arg(long)]
        exam: Option<String>,
        /// Seed for reproducible generated questions
        #[arg(long)]
        seed: Option<u64>,
        /// Show answers and explanations
        #[arg(long, default_value_t = false)]
        explain: bool,
    },

    /// Ask the tutor; starts an interactive chat when no message is given
    Ask {
        #[arg(long)]
        exam: Option<String>,
        /// Skip the simulated thinking pause
        #[arg(long, default_value_t = false)]
        no_delay: bool,
        /// Ask a built-in sample prompt (Mitosis, Photoelectric, Harmonic, Hybridization)
        #[arg(long, conflicts_with = "message")]
        sample: Option<String>,
        message: Vec<String>,
    },

    /// Simulate uploading study documents
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Declared MIME type (guessed from the extension otherwise)
        #[arg(long = "type")]
        mime: Option<String>,
        /// Use short phase delays
        #[arg(long, default_value_t = false)]
        fast: bool,
    },

    /// Show the document library
    Documents {
        /// uploading, processing, processed or rejected
        #[arg(long)]
        status: Option<UploadStatus>,
    },

    /// Show learning analytics
    Progress,

    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
    Set { theme: Theme },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("{APP_NAME} v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::builtin();
    match cli.command {
        Command::Exams => {
            println!("{APP_NAME}: {TAGLINE}");
            println!();
            for spec in &catalog.exams {
                display::print_exam_card(spec);
            }
        }
        Command::Topics { exam, subject } => cmd_topics(catalog, exam.as_deref(), subject.as_deref()),
        Command::Practice {
            subject,
            topic,
            difficulty,
            kind,
            exam,
            seed,
            explain,
        } => {
            let mut session = match seed {
                Some(seed) => Session::seeded(catalog, UploadTimings::default(), seed),
                None => Session::new(catalog, UploadTimings::default()),
            };
            if let Some(exam) = exam {
                select_exam(&mut session, &exam)?;
            }
            let mut filter = PracticeFilter::new(subject);
            if let Some(topic) = topic {
                filter = filter.topic(topic);
            }
            filter.difficulty = difficulty;
            filter.kind = kind;

            let result = session.generate_practice(filter);
            display::flush_notifications(session.notifications_mut().drain());
            display::print_questions(&result?, explain);
        }
        Command::Ask {
            exam,
            no_delay,
            sample,
            message,
        } => {
            let mut session = Session::new(catalog, UploadTimings::default());
            if let Some(exam) = exam {
                select_exam(&mut session, &exam)?;
                session.notifications_mut().drain();
            }
            let message = match sample {
                Some(name) => Some(
                    sample_prompt(&name)
                        .ok_or_else(|| anyhow!("unknown sample prompt: {name}"))?
                        .to_string(),
                ),
                None if message.is_empty() => None,
                None => Some(message.join(" ")),
            };
            match message {
                Some(text) => ask_once(&mut session, &text, no_delay).await?,
                None => chat_loop(&mut session, no_delay).await?,
            }
        }
        Command::Upload { files, mime, fast } => {
            let timings = if fast {
                UploadTimings::fast()
            } else {
                UploadTimings::default()
            };
            let mut session = Session::new(catalog, timings);
            cmd_upload(&mut session, &files, mime.as_deref()).await?;
        }
        Command::Documents { status } => {
            let session = Session::new(catalog, UploadTimings::default());
            print!("{}", display::render_documents(&session.documents(status)));
        }
        Command::Progress => display::print_progress(&ProgressSnapshot::sample()),
        Command::Theme { action } => {
            let dir = cli.state_dir.unwrap_or_else(PreferenceStore::default_dir);
            cmd_theme(&PreferenceStore::open(dir), action.unwrap_or(ThemeAction::Show))?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn select_exam(session: &mut Session<'_>, exam: &str) -> anyhow::Result<()> {
    let catalog = session.catalog();
    session.select_exam(exam).with_context(|| {
        let known: Vec<&str> = catalog.exam_ids().collect();
        format!("expected one of: {}", known.join(", "))
    })?;
    Ok(())
}

fn cmd_topics(catalog: &Catalog, exam: Option<&str>, subject: Option<&str>) {
    let subjects = match subject {
        Some(s) => vec![s],
        None => catalog.subjects(exam),
    };
    for subject in subjects {
        let topics = catalog.topics(exam, subject);
        println!("{subject}");
        if topics.is_empty() {
            println!("  (no topics)");
        }
        for topic in topics {
            println!("  {topic}");
        }
    }
}

// ── Chat ──

/// Simulated "AI is thinking" pause: 1.5 s plus up to 2 s of jitter.
fn thinking_delay() -> Duration {
    Duration::from_millis(1500 + rand::thread_rng().gen_range(0..2000))
}

async fn ask_once(session: &mut Session<'_>, message: &str, no_delay: bool) -> anyhow::Result<()> {
    if !no_delay {
        eprintln!("Bodhak AI is thinking...");
        tokio::time::sleep(thinking_delay()).await;
    }
    let exchange = session.ask(message).context("nothing to ask")?;
    display::print_reply(&exchange.reply);
    Ok(())
}

async fn chat_loop(session: &mut Session<'_>, no_delay: bool) -> anyhow::Result<()> {
    println!("{WELCOME}");
    println!("Type a question, /clear to reset, /quit to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("flushing stdout")?;
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                println!("{}", session.clear_chat());
                session.notifications_mut().drain();
            }
            text => ask_once(session, text, no_delay).await?,
        }
    }
    Ok(())
}

// ── Upload ──

async fn cmd_upload(
    session: &mut Session<'_>,
    files: &[PathBuf],
    mime: Option<&str>,
) -> anyhow::Result<()> {
    let mut events = session.uploads().subscribe();

    for path in files {
        let meta = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        if !meta.is_file() {
            bail!("{} is not a file", path.display());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let declared = mime
            .or_else(|| mime_for_name(&name))
            .unwrap_or("application/octet-stream");
        // Rejections are reported through notifications.
        let _ = session.submit_upload(FileSubmission::new(name, meta.len(), declared));
    }
    display::flush_notifications(session.notifications_mut().drain());

    loop {
        match events.try_recv() {
            Ok(event) => print_event(&event),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(broadcast::error::TryRecvError::Closed) => break,
            Err(broadcast::error::TryRecvError::Empty) => {
                if session.uploads().in_flight().is_empty() {
                    break;
                }
                tokio::select! {
                    received = events.recv() => match received {
                        Ok(event) => print_event(&event),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = tokio::signal::ctrl_c() => {
                        for record in session.uploads().in_flight() {
                            let _ = session.cancel_upload(record.id);
                        }
                    }
                }
            }
        }
    }

    session.pump_upload_events();
    display::flush_notifications(session.notifications_mut().drain());
    println!();
    print!("{}", display::render_documents(&session.documents(None)));
    Ok(())
}

fn print_event(event: &UploadEvent) {
    match event {
        UploadEvent::Transition {
            file_name, status, ..
        } => println!("  {file_name}: {status}"),
        UploadEvent::Cancelled { file_name, .. } => println!("  {file_name}: cancelled"),
    }
}

// ── Theme ──

fn cmd_theme(store: &PreferenceStore, action: ThemeAction) -> anyhow::Result<()> {
    let theme = match action {
        ThemeAction::Show => store.load().context("loading preferences")?.theme,
        ThemeAction::Toggle => store.toggle_theme().context("saving preferences")?,
        ThemeAction::Set { theme } => {
            store.set_theme(theme).context("saving preferences")?;
            theme
        }
    };
    println!("{theme}");
    Ok(())
}
