//! # SwapMatch Solver Library
//!
//! This library picks the next move for a swap-and-claim tile-matching game:
//! given a grid of colored cells it either claims a group that already
//! qualifies for score, or searches every swap and keeps the one whose
//! resulting board ranks best under an ordered list of board metrics.
//!
//! It is used by two binaries:
//! - `move_picker`: Reads a board on stdin and prints a single `SWAP`/`SCORE` line.
//! - `board_inspector`: Prints the metrics and the chosen action for a board
//!   file or a seeded random board.
//!
//! ## Modules
//! - `engine`: Board representation (`Board`, `Cell`, `Loc`) and the color `Palette`.
//! - `disjoint_set`: Union-find over flat indices.
//! - `groups`: Grid connectivity index built on the disjoint sets.
//! - `heuristics`: `BoardInfo` and the `BoardAnalyzer` that computes it.
//! - `criteria`: Metric selectors, criteria lists and the lexicographic comparison.
//! - `solver`: The `MoveEngine` and the `Action` it produces.
//! - `utils`: Parsing boards from text.
//! - `error`: The crate error type.

pub mod criteria;
pub mod disjoint_set;
pub mod engine;
pub mod error;
pub mod groups;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use criteria::{CriteriaSpec, Metric, Verdict};
pub use engine::{Board, Cell, Loc, Palette};
pub use error::{Result, SolverError};
pub use heuristics::{BoardAnalyzer, BoardInfo};
pub use solver::{Action, EngineConfig, MoveEngine};
