use crate::engine::{Board, Palette};
use crate::error::{Result, SolverError};
use std::io::BufRead;

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice is one row, starting from row 0. The board width is the
/// length of the first row and every row must have that length.
///
/// Valid characters are:
/// - a palette color (lowercase), or the same letter uppercased for emphasis
/// - `.` for an empty cell, or `*` for an emphasized empty cell
///
/// Emphasis is dropped: the returned board only holds canonical cells.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(SolverError)` if a row has the wrong length or a character is not recognized.
///
/// # Examples
/// ```
/// use swapmatch_solver::engine::{Cell, Loc, Palette};
/// use swapmatch_solver::utils::board_from_str_array;
///
/// let palette = Palette::new("rgb").unwrap();
/// let board = board_from_str_array(&["rG.", "*bb"], &palette).unwrap();
/// assert_eq!(board.width(), 3);
/// assert_eq!(board.height(), 2);
/// assert_eq!(board.cell(Loc::new(0, 1)), Cell::Color(1));
/// assert_eq!(board.cell(Loc::new(1, 0)), Cell::Empty);
///
/// assert!(board_from_str_array(&["rxb"], &palette).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str], palette: &Palette) -> Result<Board> {
    let width = rows.first().map_or(0, |row| row.chars().count());
    let mut grid = Vec::with_capacity(rows.len());

    for (r, row_str) in rows.iter().enumerate() {
        let found = row_str.chars().count();
        if found != width {
            return Err(SolverError::RowLength {
                row: r,
                expected: width,
                found,
            });
        }

        let row = row_str
            .chars()
            .enumerate()
            .map(|(c, ch)| {
                palette
                    .parse_cell(ch)
                    .ok_or(SolverError::UnknownCell { ch, row: r, col: c })
            })
            .collect::<Result<Vec<_>>>()?;
        grid.push(row);
    }

    Board::from_rows(grid)
}

/// Reads exactly `height` rows of `width` characters from `reader`.
///
/// Trailing whitespace (including `\r`) is ignored; anything after the
/// `height`-th line is left unread.
pub fn read_board(reader: impl BufRead, width: usize, height: usize, palette: &Palette) -> Result<Board> {
    let mut lines = Vec::with_capacity(height);
    for line in reader.lines().take(height) {
        lines.push(line?.trim_end().to_string());
    }

    if lines.len() != height {
        return Err(SolverError::RowCount {
            expected: height,
            found: lines.len(),
        });
    }

    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(SolverError::RowLength {
                row,
                expected: width,
                found,
            });
        }
    }

    let rows: Vec<&str> = lines.iter().map(String::as_str).collect();
    board_from_str_array(&rows, palette)
}
