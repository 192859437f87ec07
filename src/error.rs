//! Error type shared by every fallible operation in the crate.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Everything that can go wrong while configuring the engine or reading a board.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Unknown metric id {0} in criteria list (expected 0-9)")]
    UnknownMetric(u32),
    #[error("Invalid criteria token '{0}': expected a non-negative integer")]
    InvalidCriteriaToken(String),
    #[error("Failed to read criteria file {path}: {source}")]
    CriteriaIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read board: {0}")]
    Io(#[from] std::io::Error),
    #[error("Palette must contain at least one color")]
    EmptyPalette,
    #[error("Palette color '{0}' is not a lowercase letter or is repeated")]
    InvalidPaletteColor(char),
    #[error("Invalid number of rows. Expected {expected}, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("Row {row} has {found} characters (expected {expected})")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unrecognized character '{ch}' in row {row} col {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
    #[error("Board size {found_width}x{found_height} does not match engine size {width}x{height}")]
    BoardSize {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
    #[error("Swap search needs at least two occupied cells, found {0}")]
    NotEnoughCells(usize),
}
