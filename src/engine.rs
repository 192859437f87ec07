//! Board model for the swap-and-claim tile game.
//!
//! This module defines the game's fundamental components:
//! - `Cell`: A single grid cell, either empty or one of the palette colors.
//! - `Palette`: The ordered color alphabet and the per-color point values.
//! - `Loc`: A (row, column) location, ordered row-major.
//! - `Board`: A rectangular row-major grid of cells with swap support and
//!   seeded random generation.
use crate::error::{Result, SolverError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// The character used for empty cells in the text encoding.
pub const EMPTY_CHAR: char = '.';

/// Wildcard marker accepted in the text encoding; it always means an empty cell.
pub const WILDCARD_CHAR: char = '*';

/// Represents the content of one board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Nothing here.
    Empty,
    /// A colored cell; the payload is the color's position in the `Palette`.
    Color(u8),
}

impl Cell {
    /// Returns `true` for `Cell::Empty`.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Maps an encoded board character to its canonical form.
///
/// Uppercase letters are emphasis markers for the lowercase color of the same
/// letter, and `*` is an emphasized empty cell. Everything else passes through.
/// Applying this twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use swapmatch_solver::engine::canonicalize_char;
/// assert_eq!(canonicalize_char('R'), 'r');
/// assert_eq!(canonicalize_char('*'), '.');
/// assert_eq!(canonicalize_char('g'), 'g');
/// ```
pub fn canonicalize_char(ch: char) -> char {
    if ch == WILDCARD_CHAR {
        EMPTY_CHAR
    } else {
        ch.to_ascii_lowercase()
    }
}

/// Canonicalizes every character of an encoded row (see [`canonicalize_char`]).
pub fn canonicalize_row(row: &str) -> String {
    row.chars().map(canonicalize_char).collect()
}

/// The ordered color alphabet supplied at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<char>,
}

impl Palette {
    /// Builds a palette from an alphabet string such as `"rgbyp"`.
    ///
    /// Every color must be a distinct lowercase ASCII letter.
    pub fn new(alphabet: &str) -> Result<Self> {
        let mut colors: Vec<char> = Vec::with_capacity(alphabet.len());
        for ch in alphabet.chars() {
            if !ch.is_ascii_lowercase() || colors.contains(&ch) {
                return Err(SolverError::InvalidPaletteColor(ch));
            }
            colors.push(ch);
        }
        if colors.is_empty() {
            return Err(SolverError::EmptyPalette);
        }
        Ok(Palette { colors })
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false` for a palette built with `Palette::new`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Decodes one (possibly emphasized) board character.
    ///
    /// Returns `None` for characters that are neither empty markers nor palette colors.
    pub fn parse_cell(&self, ch: char) -> Option<Cell> {
        let ch = canonicalize_char(ch);
        if ch == EMPTY_CHAR {
            return Some(Cell::Empty);
        }
        self.colors
            .iter()
            .position(|&c| c == ch)
            .map(|idx| Cell::Color(idx as u8))
    }

    /// Converts a cell back to its canonical character.
    pub fn to_char(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => EMPTY_CHAR,
            Cell::Color(idx) => self.colors[idx as usize],
        }
    }

    /// Point value of a color: its 1-based position in the alphabet plus one.
    pub fn point_value(&self, color: u8) -> usize {
        color as usize + 2
    }
}

/// A (row, column) location on the board.
///
/// The derived ordering compares `row` first, so sorting is row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    pub row: usize,
    pub col: usize,
}

impl Loc {
    pub fn new(row: usize, col: usize) -> Self {
        Loc { row, col }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

// Picks either a palette color or an empty cell, all with equal probability.
fn generate_random_cell(rng: &mut impl Rng, colors: usize) -> Cell {
    let pick = rng.gen_range(0..=colors);
    if pick == colors {
        Cell::Empty
    } else {
        Cell::Color(pick as u8)
    }
}

/// Represents the game board as a row-major grid of `Cell`s.
///
/// The dimensions are fixed for the lifetime of the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a `width` x `height` board where every cell is `Cell::Empty`.
    ///
    /// # Examples
    /// ```
    /// use swapmatch_solver::engine::{Board, Cell, Loc};
    /// let board = Board::new_empty(5, 4);
    /// assert_eq!(board.width(), 5);
    /// assert_eq!(board.height(), 4);
    /// assert_eq!(board.cell(Loc::new(3, 4)), Cell::Empty);
    /// ```
    pub fn new_empty(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Creates a board from rows of cells. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (row, row_cells) in rows.into_iter().enumerate() {
            if row_cells.len() != width {
                return Err(SolverError::RowLength {
                    row,
                    expected: width,
                    found: row_cells.len(),
                });
            }
            cells.extend(row_cells);
        }
        Ok(Board {
            width,
            height,
            cells,
        })
    }

    /// Creates a reproducible random board using `colors` distinct colors.
    ///
    /// Each cell is empty or one of the colors with equal probability. The same
    /// seed always yields the same board.
    pub fn random_with_seed(width: usize, height: usize, colors: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let cells = (0..width * height)
            .map(|_| generate_random_cell(&mut rng, colors))
            .collect();
        Board {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `loc`.
    ///
    /// # Panics
    /// Panics if `loc` is outside the board.
    pub fn cell(&self, loc: Loc) -> Cell {
        self.cells[self.index(loc)]
    }

    /// Sets the cell at `loc`.
    ///
    /// # Panics
    /// Panics if `loc` is outside the board.
    pub fn set_cell(&mut self, loc: Loc, cell: Cell) {
        let idx = self.index(loc);
        self.cells[idx] = cell;
    }

    /// Exchanges the contents of two cells.
    ///
    /// # Panics
    /// Panics if either location is outside the board.
    pub fn swap(&mut self, a: Loc, b: Loc) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells.swap(ia, ib);
    }

    /// Returns `true` if `loc` lies inside the board.
    pub fn contains(&self, loc: Loc) -> bool {
        loc.row < self.height && loc.col < self.width
    }

    /// All non-empty locations in row-major order.
    pub fn occupied_locs(&self) -> Vec<Loc> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(idx, _)| Loc::new(idx / self.width, idx % self.width))
            .collect()
    }

    /// Number of `Cell::Empty` cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Encodes the board as text rows, uppercasing the cells listed in `highlight`.
    ///
    /// Highlighted empty cells are written as `*`. The output parses back to the
    /// same board since emphasis is dropped during canonicalization.
    pub fn to_rows(&self, palette: &Palette, highlight: &[Loc]) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        let loc = Loc::new(row, col);
                        let ch = palette.to_char(self.cell(loc));
                        match (highlight.contains(&loc), ch) {
                            (false, ch) => ch,
                            (true, EMPTY_CHAR) => WILDCARD_CHAR,
                            (true, ch) => ch.to_ascii_uppercase(),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn index(&self, loc: Loc) -> usize {
        assert!(
            self.contains(loc),
            "location ({}, {}) is outside a {}x{} board",
            loc.row,
            loc.col,
            self.width,
            self.height
        );
        loc.row * self.width + loc.col
    }
}
