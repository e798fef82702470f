use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use misplete::{
    Config, EventResult, Host, InputController, Key, MemoryHost, RankingEngine, WidgetEvent,
};
use misplete_core::{load_candidates, Candidate, Scorer};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "misplete", about = "Fuzzy autocomplete over a candidate file")]
struct Cli {
    /// TOML configuration (max_items, max_cache_size)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank every candidate against one query
    Rank {
        /// candidate file (.json or .toml)
        #[arg(long)]
        candidates: PathBuf,
        query: String,
        /// print at most this many rows
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Drive the widget line by line from stdin
    Interactive {
        /// candidate file (.json or .toml)
        #[arg(long)]
        candidates: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Command::Rank {
            candidates,
            query,
            limit,
            json,
        } => rank(&config, &candidates, &query, limit, json),
        Command::Interactive { candidates } => interactive(config, &candidates),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let candidates = load_candidates(path)
        .with_context(|| format!("loading candidates from {}", path.display()))?;
    if candidates.is_empty() {
        bail!("{} contains no candidates", path.display());
    }
    debug!(path = %path.display(), count = candidates.len(), "loaded candidates");
    Ok(candidates)
}

fn rank(
    config: &Config,
    path: &Path,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let candidates = read_candidates(path)?;
    let engine = RankingEngine::with_config(config);
    let mut ranking = engine.rank(query, &candidates)?;
    if let Some(limit) = limit {
        ranking.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        for scored in &ranking {
            println!("{:>5}  {}", scored.score, scored.display_value);
        }
    }
    Ok(())
}

enum Line {
    Text(String),
    Event(WidgetEvent),
    Quit,
}

fn parse_line(line: &str) -> Result<Line> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Line::Text(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();

    let event = match (name, arg) {
        ("quit" | "q", None) => return Ok(Line::Quit),
        ("down", None) => WidgetEvent::KeyDown(Key::Down),
        ("up", None) => WidgetEvent::KeyDown(Key::Up),
        ("enter", None) => WidgetEvent::KeyDown(Key::Enter),
        ("esc", None) => WidgetEvent::KeyDown(Key::Escape),
        ("blur", None) => WidgetEvent::Blur,
        ("leave", None) => WidgetEvent::PointerLeave,
        ("hover", Some(n)) => WidgetEvent::PointerOver {
            item: Some(n.parse::<usize>().with_context(|| format!("bad item index {:?}", n))?),
        },
        ("click", Some(n)) => WidgetEvent::Click {
            item: Some(n.parse::<usize>().with_context(|| format!("bad item index {:?}", n))?),
        },
        _ => bail!("unknown command :{}", command),
    };
    Ok(Line::Event(event))
}

fn interactive(config: Config, path: &Path) -> Result<()> {
    let candidates = read_candidates(path)?;
    let mut widget = InputController::builder(MemoryHost::new(), candidates)
        .config(config)
        .build()?;

    println!("type to search; :down :up :enter :esc :blur :hover N :leave :click N :quit");
    let stdin = io::stdin();
    let mut out = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(committed) = step(&mut widget, &line) else {
            break;
        };
        for value in committed {
            writeln!(out, "committed: {}", value)?;
        }
        show(&widget, &mut out)?;
    }
    Ok(())
}

/// Feed one input line to the widget. Returns the committed values, or
/// `None` when the line asks to quit. Bad lines and failed rankings are
/// logged and leave the widget as it was.
fn step<S: Scorer>(widget: &mut InputController<MemoryHost, S>, line: &str) -> Option<Vec<String>> {
    let events = match parse_line(line) {
        Ok(Line::Quit) => return None,
        Ok(Line::Text(text)) => {
            widget.host_mut().type_text(&text);
            vec![WidgetEvent::Input]
        }
        // Pointer clicks arrive after the pointer is down
        Ok(Line::Event(event @ WidgetEvent::Click { .. })) => {
            vec![WidgetEvent::PointerDown, event]
        }
        Ok(Line::Event(event)) => vec![event],
        Err(err) => {
            warn!(line, error = %format!("{:#}", err), "ignoring input line");
            return Some(Vec::new());
        }
    };

    let mut committed = Vec::new();
    for event in events {
        match widget.handle_event(event) {
            Ok(EventResult::Committed(value)) => committed.push(value),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "ranking failed; keeping previous suggestions"),
        }
    }
    debug!(line, committed = committed.len(), "handled input line");
    Some(committed)
}

fn show(widget: &InputController<MemoryHost>, out: &mut impl Write) -> Result<()> {
    let host = widget.host();
    writeln!(out, "field: {:?}", host.input_value())?;
    for item in host.items() {
        let marker = if item.highlighted { '>' } else { ' ' };
        writeln!(out, "{} {:>2}  {}", marker, item.index, item.text)?;
    }
    out.flush()?;
    Ok(())
}
