use clap::Parser;
use swapmatch_solver::utils::board_from_str_array;
use swapmatch_solver::{Action, Board, EngineConfig, MoveEngine, Palette, Result};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a board file; its size is taken from the file
    board_file: Option<PathBuf>,

    /// Generate a random board from this seed instead of reading a file
    #[arg(short, long, conflicts_with = "board_file")]
    seed: Option<u64>,

    /// Width of a generated board
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Height of a generated board
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Minimum group size that can be scored (at least 3)
    #[arg(short, long, default_value_t = 3)]
    min_score: usize,

    /// Color alphabet, one lowercase letter per color
    #[arg(short, long, default_value = "rgbyp")]
    colors: String,

    /// Criteria file used in normal mode
    #[arg(long, default_value = "criteria-normal.txt")]
    normal: PathBuf,

    /// Criteria file used in panic mode
    #[arg(long, default_value = "criteria-panic.txt")]
    panic: PathBuf,
}

fn load_board(args: &Args, palette: &Palette) -> Result<Board> {
    match (&args.board_file, args.seed) {
        (Some(path), _) => {
            let content = fs::read_to_string(path)?;
            let lines: Vec<&str> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            board_from_str_array(&lines, palette)
        }
        (None, seed) => Ok(Board::random_with_seed(
            args.width,
            args.height,
            palette.len(),
            seed.unwrap_or(0),
        )),
    }
}

fn run(args: &Args) -> Result<()> {
    let palette = Palette::new(&args.colors)?;
    let board = load_board(args, &palette)?;
    let config = EngineConfig {
        width: board.width(),
        height: board.height(),
        min_score: args.min_score,
        palette: palette.clone(),
    };
    let engine = MoveEngine::load(config, &args.normal, &args.panic)?;
    let info = engine.compute_info(&board)?;

    println!("Board ({}x{}):", board.width(), board.height());
    for row in board.to_rows(&palette, engine.analyzer().score_zone().locs()) {
        println!("  {}", row);
    }
    println!();
    println!("{:#?}", info);
    println!(
        "Mode: {}",
        if MoveEngine::is_panic(&info) { "panic" } else { "normal" }
    );
    println!("Criteria: {}", engine.active_criteria(&info));

    let action = engine.choose_action(&board)?;
    println!();
    println!("Action: {}", action);
    let highlight = match action {
        Action::Swap(a, b) => vec![a, b],
        Action::Score(loc) => vec![loc],
    };
    for row in board.to_rows(&palette, &highlight) {
        println!("  {}", row);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
