//! Shikaku command-line front end.
//!
//! Reads a puzzle in the `W H` text format from a file or stdin, enumerates
//! its solutions, and prints them as token grids or boxed outlines.

mod parse;
mod render;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use shikaku_core::Solver;

use render::RenderOptions;

#[derive(Parser)]
#[command(name = "shikaku", version, about = "Shikaku (rectangle-division) puzzle solver")]
struct Cli {
    /// Path to a puzzle grid (reads stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Apply ANSI colors to the output
    #[arg(long)]
    color: bool,

    /// Print all solutions instead of the first
    #[arg(long)]
    all: bool,

    /// Keep the clue numbers in the output
    #[arg(long)]
    keepnum: bool,

    /// How to display solutions
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    output: OutputMode,

    /// Log informative messages (repeat for debug output)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Flat grids of rectangle labels
    Text,
    /// Rectangle outlines drawn with box characters
    Grid,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let board = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            parse::parse_board(BufReader::new(file))?
        }
        None => parse::parse_board(io::stdin().lock())?,
    };
    log::info!(
        "parsed a {}x{} board with {} clues",
        board.height(),
        board.width(),
        board.clues().len()
    );

    let solutions = Solver::new().solve(&board);

    let opts = RenderOptions {
        color: cli.color,
        all: cli.all,
        keep_numbers: cli.keepnum,
    };
    let mut stdout = io::stdout().lock();
    match cli.output {
        OutputMode::Text => render::print_text(&mut stdout, &board, &solutions, &opts)?,
        OutputMode::Grid => render::print_boxed(&mut stdout, &board, &solutions, &opts)?,
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
