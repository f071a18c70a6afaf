use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use connect_four::config::AppConfig;
use connect_four::game::{GameSession, Outcome, Status};
use connect_four::ui::App;

/// Two-player Connect Four.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default)
    Play {
        /// Path to TOML configuration file
        #[arg(long, default_value = "connect-four.toml")]
        config: PathBuf,

        /// Where to write logs while the UI owns the screen
        #[arg(long, default_value = "connect-four.log")]
        log_file: PathBuf,
    },
    /// Apply a list of columns to a new game and print each result
    Replay {
        /// Comma-separated zero-based columns, e.g. 3,3,4,2
        #[arg(value_delimiter = ',', required = true)]
        columns: Vec<usize>,

        /// Print one JSON object per move
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Play { config, log_file }) => play(&cli.log_level, &config, &log_file),
        None => play(
            &cli.log_level,
            Path::new("connect-four.toml"),
            Path::new("connect-four.log"),
        ),
        Some(Command::Replay { columns, json }) => {
            init_tracing(&cli.log_level, None)?;
            replay(&columns, json)
        }
    }
}

/// Install the global subscriber; logs go to `log_file` when given, else stderr.
fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| anyhow!("initializing logging: {e}"))
}

fn play(log_level: &str, config_path: &Path, log_file: &Path) -> Result<()> {
    init_tracing(log_level, Some(log_file))?;

    let config = AppConfig::load_or_default(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    info!(?config, "starting");

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even if the UI loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}

fn replay(columns: &[usize], json: bool) -> Result<()> {
    let mut session = GameSession::new();

    for (index, &column) in columns.iter().enumerate() {
        match session.apply_move(column) {
            Ok(result) if json => {
                println!("{}", serde_json::to_string(&result)?);
            }
            Ok(result) => {
                let outcome = match result.outcome {
                    Outcome::Continue => String::new(),
                    Outcome::Win(player) => format!("  {player} wins"),
                    Outcome::Draw => "  draw".to_string(),
                };
                println!(
                    "{:>3}. {} -> row {}, column {}{}",
                    index + 1,
                    result.player,
                    result.row,
                    result.column,
                    outcome
                );
            }
            Err(err) => {
                warn!(index, column, error = %err, "move ignored");
                if json {
                    let rejected = serde_json::json!({
                        "index": index,
                        "column": column,
                        "error": err.to_string(),
                    });
                    println!("{rejected}");
                }
            }
        }
    }

    if !json {
        println!();
        print!("{}", session.board());
        match session.status() {
            Status::InProgress => println!("In progress, {} to move", session.current_player()),
            Status::Won(player) => println!("{player} won"),
            Status::Draw => println!("Draw"),
        }
    }
    Ok(())
}
