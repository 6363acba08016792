use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use prompter::project::PROJECT_EXTENSION;
use prompter::{Error, NarrationSession, Preferences, TextSource};

#[derive(Parser, Debug)]
#[command(name = "prompter")]
#[command(about = "Paragraph-at-a-time narration prompter for long-form recording")]
#[command(version)]
struct Args {
    /// Text document to narrate, or a .ndp project to resume
    input: PathBuf,

    /// Print paragraph N (zero-based) instead of the session position
    #[arg(long)]
    paragraph: Option<usize>,

    /// Print the total paragraph count and exit
    #[arg(long)]
    count: bool,

    /// Sentences per paragraph (overrides preferences)
    #[arg(long)]
    sentence_limit: Option<usize>,

    /// Collapse interior whitespace in displayed paragraphs
    #[arg(long)]
    simplify: bool,

    /// Write the session to this project file before exiting
    #[arg(long)]
    save: Option<PathBuf>,

    /// Read commands from stdin (getprg N, getnumprgs, next, back, take, save, exit)
    #[arg(long)]
    interactive: bool,

    /// Directory holding the preferences file
    #[arg(long, default_value = ".")]
    prefs_dir: PathBuf,

    /// Suppress the scan progress spinner
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting prompter");
    info!(?args, "Parsed CLI arguments");

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }
    if !args.input.is_file() {
        anyhow::bail!("Input path is not a file: {}", args.input.display());
    }

    let mut prefs = Preferences::load(&args.prefs_dir).await;
    if let Some(limit) = args.sentence_limit {
        if limit == 0 {
            anyhow::bail!("--sentence-limit must be at least 1");
        }
        prefs.sentence_limit = limit;
    }
    if args.simplify {
        prefs.simplify = true;
    }

    let resuming = args
        .input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION));

    let mut session = if resuming {
        info!("Resuming project {}", args.input.display());
        NarrationSession::resume(&args.input, &prefs).await?
    } else {
        info!("Opening document {}", args.input.display());
        NarrationSession::open(&args.input, &prefs).await?
    };

    if args.count {
        let total = count_with_spinner(&mut session, args.no_progress);
        println!("{total}");
    } else if let Some(number) = args.paragraph {
        let text = session.go_to(number)?;
        println!("{text}");
    } else if args.interactive {
        run_interactive(&mut session, args.no_progress).await?;
    } else {
        let label = session.paragraph_label();
        let text = session.current_paragraph()?;
        println!("{label}");
        println!();
        println!("{text}");
    }

    if let Some(project_path) = &args.save {
        session.save(project_path).await?;
        println!("Saved project to {}", project_path.display());
    } else if session.is_dirty() && !args.interactive {
        info!("Session has unsaved discoveries; pass --save to persist them");
    }

    Ok(())
}

/// Run the full pre-scan count behind a spinner; counting a large document
/// is the one operation here that takes noticeable time.
fn count_with_spinner<S: TextSource>(
    session: &mut NarrationSession<S>,
    no_progress: bool,
) -> usize {
    if no_progress {
        return session.total_paragraph_count();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Counting paragraphs...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let total = session.total_paragraph_count();
    spinner.finish_and_clear();
    total
}

async fn run_interactive<S: TextSource>(
    session: &mut NarrationSession<S>,
    no_progress: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", session.paragraph_label());
    println!("{}", session.current_paragraph()?);

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "exit" => break,
            "getnumprgs" => {
                println!("{}", count_with_spinner(session, no_progress));
            }
            "getprg" => match parts.next().map(str::parse::<usize>) {
                Some(Ok(number)) => print_move(session.go_to(number)),
                _ => eprintln!("Usage: getprg <paragraph-number>"),
            },
            "next" => print_move(session.next()),
            "back" => print_move(session.back()),
            "take" => println!("{}", session.take_file_name()),
            "save" => match parts.next() {
                Some(path) => {
                    let path = PathBuf::from(path);
                    session.save(&path).await?;
                    println!("Saved project to {}", path.display());
                }
                None => eprintln!("Usage: save <project-file>"),
            },
            other => eprintln!("Unknown command: {other}"),
        }
    }

    Ok(())
}

fn print_move<T: std::fmt::Display>(result: prompter::Result<T>) {
    match result {
        Ok(text) => println!("{text}"),
        Err(Error::EndOfDocument { .. }) => eprintln!("End of document."),
        Err(e) => eprintln!("{e}"),
    }
}
