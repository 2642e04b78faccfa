use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use hashcard_cli::commands;

#[derive(Parser)]
#[command(
    name = "hashcard",
    about = "Maintains a flat-file flashcard deck built from a frequency-ordered dictionary",
    version,
    long_about = "Maintains a flat-file flashcard deck. Entries are drawn from a \
frequency-ordered key<TAB>body dictionary file; a persisted cursor remembers how \
far down the ranking the deck has consumed."
)]
struct Cli {
    /// Deck file to modify
    out: PathBuf,

    /// Number of entries, or a word, to remove from the deck
    #[arg(short, long, conflicts_with = "entries")]
    remove: Option<String>,

    /// Number of entries, or a word, to add from the dictionary
    #[arg(short, long)]
    entries: Option<String>,

    /// Dictionary file to draw entries from
    #[arg(short, long, default_value = "HawFreqToEng.txt")]
    dict: PathBuf,

    /// Directory holding the persisted cursor (defaults to the
    /// per-user config directory)
    #[arg(long, env = "HASHCARD_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    let store = commands::open_store(&cli.out, cli.state_dir.as_deref())?;

    if let Some(value) = cli.remove.as_deref() {
        commands::remove(&store, value)?;
    }
    if let Some(value) = cli.entries.as_deref() {
        commands::add_entries(&store, &cli.dict, value)?;
    }

    Ok(())
}
