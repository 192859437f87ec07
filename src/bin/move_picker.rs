use clap::Parser;
use swapmatch_solver::utils::read_board;
use swapmatch_solver::{Action, EngineConfig, MoveEngine, Palette, Result};
use std::io;
use std::path::PathBuf;

/// Reads `height` board rows from stdin and prints the chosen action.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of board rows
    height: usize,

    /// Number of board columns
    width: usize,

    /// Minimum group size that can be scored (at least 3)
    min_score: usize,

    /// Color alphabet, one lowercase letter per color
    colors: String,

    /// Criteria file used in normal mode
    #[arg(long, default_value = "criteria-normal.txt")]
    normal: PathBuf,

    /// Criteria file used in panic mode
    #[arg(long, default_value = "criteria-panic.txt")]
    panic: PathBuf,
}

fn run(args: &Args) -> Result<Action> {
    let palette = Palette::new(&args.colors)?;
    let config = EngineConfig {
        width: args.width,
        height: args.height,
        min_score: args.min_score,
        palette: palette.clone(),
    };
    let engine = MoveEngine::load(config, &args.normal, &args.panic)?;
    let board = read_board(io::stdin().lock(), args.width, args.height, &palette)?;
    engine.choose_action(&board)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(action) => println!("{}", action),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
