use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{GameSession, Snapshot, StartTile};
use tracing_subscriber::filter::LevelFilter;
use web_time::{SystemTime, UNIX_EPOCH};

use command::{Command, HELP};
use settings::{BoardOptions, Preset};

mod command;
mod render;
mod settings;

/// Clear the board without stepping on a mine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Start from a standard board
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Load the board from a TOML file with width, height and mines
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<u8>,

    /// Board height in cells
    #[arg(long)]
    height: Option<u8>,

    /// Number of mines
    #[arg(short, long)]
    mines: Option<u16>,

    /// Fraction of cells holding a mine, between 0 and 1
    #[arg(short, long)]
    density: Option<f64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep the whole neighborhood of the first cell free of mines
    #[arg(long)]
    safe_zone: bool,

    /// Print each snapshot as a JSON line instead of a text board
    #[arg(long)]
    json: bool,
}

impl Args {
    fn board_options(&self) -> BoardOptions {
        BoardOptions {
            preset: self.preset,
            width: self.width,
            height: self.height,
            mines: self.mines,
            density: self.density,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let file_config = args.config.as_deref().map(settings::load).transpose()?;
    let config = settings::resolve(file_config, &args.board_options())?;
    let start_tile = if args.safe_zone {
        StartTile::AlwaysZero
    } else {
        StartTile::SimpleSafe
    };

    let mut seed = args.seed.unwrap_or_else(random_seed);
    tracing::debug!(seed, ?config, ?start_tile, "starting");
    let mut game = GameSession::new(config, seed)?.with_start_tile(start_tile);

    let mut out = io::stdout().lock();
    print_snapshot(&mut out, &game.snapshot(), args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        let result = match command {
            Command::Reveal(coords) => game.reveal(coords),
            Command::Flag(coords) => game.toggle_flag(coords),
            Command::Chord(coords) => game.chord(coords),
            Command::New => {
                // keep forced seeds reproducible across games
                seed = match args.seed {
                    Some(_) => seed.wrapping_add(1),
                    None => random_seed(),
                };
                tracing::debug!(seed, "new game");
                game.reset(config, seed)
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        };

        match result {
            Ok(snapshot) => print_snapshot(&mut out, &snapshot, args.json)?,
            Err(err) => {
                tracing::info!(%err, ?command, "move rejected");
                writeln!(out, "{err}")?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_nanos() as u64)
        .unwrap_or_default()
}

fn print_snapshot(out: &mut impl Write, snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, snapshot)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::Board(snapshot))?;
    }
    out.flush()?;
    Ok(())
}
