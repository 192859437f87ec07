//! Board quality metrics.
//!
//! `BoardAnalyzer` scans a board once and summarizes it as a
//! `BoardInfo`: group counts, score-zone statistics, and the looser
//! "weak" connectivity used to spot near-merges.
use crate::engine::{Board, Cell, Loc, Palette};
use crate::groups::{GroupId, GroupIndex};
use std::collections::HashSet;

/// Groups strictly smaller than this count towards `num_small_groups`.
pub const SMALL_GROUP_BOUND: usize = 5;

/// Neighbors already visited by a row-major scan under the weak window:
/// left, up-left, up, up-right.
///
/// Joining each cell with these four backward neighbors yields exactly the
/// 8-connected same-color components.
const WEAK_WINDOW: [(isize, isize); 4] = [(0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// The fixed set of locations whose groups may be claimed for score.
///
/// It covers the two leftmost and two rightmost columns of rows
/// `2..height - 2`, listed row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreZone {
    locs: Vec<Loc>,
}

impl ScoreZone {
    pub fn new(width: usize, height: usize) -> Self {
        let left = 0..width.min(2);
        // Narrow boards would otherwise list a column twice.
        let right = width.saturating_sub(2).max(left.end)..width;
        let mut locs = Vec::new();
        for row in 2..height.saturating_sub(2) {
            for col in left.clone().chain(right.clone()) {
                locs.push(Loc::new(row, col));
            }
        }
        ScoreZone { locs }
    }

    pub fn locs(&self) -> &[Loc] {
        &self.locs
    }

    pub fn contains(&self, loc: Loc) -> bool {
        self.locs.contains(&loc)
    }
}

/// Snapshot of a board's quality. Built once per board state and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardInfo {
    /// Distinct non-empty groups.
    pub num_groups: usize,
    /// Empty cells.
    pub num_empty: usize,
    /// Smallest `min_score - size` over score-zone groups, or the cell count
    /// when the zone holds no group. Negative once a group exceeds the threshold.
    pub need: i64,
    /// Mean score-zone group size times ten, rounded down.
    pub score_val: usize,
    /// Largest score-zone group meeting the threshold, 0 if none.
    pub best_size: usize,
    /// A zone cell of the best group; `Some` exactly when `best_size > 0`.
    pub best_loc: Option<Loc>,
    /// Palette value of the best group's color times `best_size`.
    pub best_points: usize,
    /// Distinct groups touching the score zone.
    pub num_score_groups: usize,
    /// Score-zone groups already meeting the threshold.
    pub num_scorable: usize,
    /// Non-empty groups under the weak (diagonal-aware) adjacency.
    pub num_weak_groups: usize,
    /// Distinct groups smaller than `SMALL_GROUP_BOUND`.
    pub num_small_groups: usize,
    /// `num_groups - num_score_groups`.
    pub num_field_groups: usize,
}

/// Computes `BoardInfo` for boards of one fixed size and scoring rule.
#[derive(Clone, Debug)]
pub struct BoardAnalyzer {
    width: usize,
    height: usize,
    min_score: usize,
    palette: Palette,
    zone: ScoreZone,
}

impl BoardAnalyzer {
    pub fn new(width: usize, height: usize, min_score: usize, palette: Palette) -> Self {
        BoardAnalyzer {
            width,
            height,
            min_score,
            palette,
            zone: ScoreZone::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn min_score(&self) -> usize {
        self.min_score
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn score_zone(&self) -> &ScoreZone {
        &self.zone
    }

    /// Builds the ordinary 4-connected group index for `board`.
    ///
    /// Returns the index along with the number of empty cells seen.
    pub fn group_index(&self, board: &Board) -> (GroupIndex, usize) {
        let mut groups = GroupIndex::new(self.width, self.height);
        let mut num_empty = 0;

        for row in 0..self.height {
            for col in 0..self.width {
                let loc = Loc::new(row, col);
                let cell = board.cell(loc);
                if cell.is_empty() {
                    num_empty += 1;
                    continue;
                }
                if row > 0 {
                    let up = Loc::new(row - 1, col);
                    if board.cell(up) == cell {
                        groups.join(loc, up);
                    }
                }
                if col > 0 {
                    let left = Loc::new(row, col - 1);
                    if board.cell(left) == cell {
                        groups.join(loc, left);
                    }
                }
            }
        }

        (groups, num_empty)
    }

    /// Counts non-empty groups when diagonal neighbors also connect.
    ///
    /// Uses its own `GroupIndex`, independent of `group_index`.
    pub fn weak_groups(&self, board: &Board) -> usize {
        let mut groups = GroupIndex::new(self.width, self.height);
        let mut num_empty = 0;

        for row in 0..self.height {
            for col in 0..self.width {
                let loc = Loc::new(row, col);
                let cell = board.cell(loc);
                if cell.is_empty() {
                    num_empty += 1;
                    continue;
                }
                for (dr, dc) in WEAK_WINDOW {
                    let (Some(r), Some(c)) =
                        (row.checked_add_signed(dr), col.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    let neighbor = Loc::new(r, c);
                    if board.contains(neighbor) && board.cell(neighbor) == cell {
                        groups.join(loc, neighbor);
                    }
                }
            }
        }

        groups.num_roots() - num_empty
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, board: &Board) -> ((GroupIndex, usize), usize) {
        rayon::join(|| self.group_index(board), || self.weak_groups(board))
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, board: &Board) -> ((GroupIndex, usize), usize) {
        (self.group_index(board), self.weak_groups(board))
    }

    /// Summarizes `board`.
    ///
    /// The board is already canonical: emphasis markers are dropped when it is
    /// parsed (see [`crate::utils::board_from_str_array`]). Callers check the
    /// board size first; `MoveEngine::compute_info` does this.
    ///
    /// # Panics
    /// Panics if the board's dimensions differ from the analyzer's.
    pub(crate) fn compute_info(&self, board: &Board) -> BoardInfo {
        assert_eq!(
            (board.width(), board.height()),
            (self.width, self.height),
            "board size does not match the analyzer"
        );

        let ((mut groups, num_empty), num_weak_groups) = self.scan(board);
        let num_groups = groups.num_roots() - num_empty;

        let sizes = groups.sizes();
        let mut small_groups: HashSet<GroupId> = HashSet::new();
        for loc in board.occupied_locs() {
            let group = groups.group_of(loc);
            if sizes[&group] < SMALL_GROUP_BOUND {
                small_groups.insert(group);
            }
        }

        let mut score_groups: HashSet<GroupId> = HashSet::new();
        let mut size_sum = 0;
        let mut need = (self.width * self.height) as i64;
        let mut best_size = 0;
        let mut best_loc = None;
        let mut best_points = 0;
        let mut num_scorable = 0;

        for &loc in self.zone.locs() {
            let Cell::Color(color) = board.cell(loc) else {
                continue;
            };
            let group = groups.group_of(loc);
            if !score_groups.insert(group) {
                continue;
            }
            let size = sizes[&group];
            size_sum += size;

            if size >= self.min_score {
                num_scorable += 1;
                if size > best_size {
                    best_size = size;
                    best_loc = Some(loc);
                    best_points = self.palette.point_value(color) * size;
                }
            }

            need = need.min(self.min_score as i64 - size as i64);
        }

        let num_score_groups = score_groups.len();
        let score_val = if num_score_groups > 0 {
            size_sum * 10 / num_score_groups
        } else {
            0
        };

        BoardInfo {
            num_groups,
            num_empty,
            need,
            score_val,
            best_size,
            best_loc,
            best_points,
            num_score_groups,
            num_scorable,
            num_weak_groups,
            num_small_groups: small_groups.len(),
            num_field_groups: num_groups - num_score_groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

    fn analyzer_for(board: &Board, min_score: usize) -> BoardAnalyzer {
        BoardAnalyzer::new(
            board.width(),
            board.height(),
            min_score,
            Palette::new(ALPHABET).unwrap(),
        )
    }

    fn parse(rows: &[&str]) -> Board {
        board_from_str_array(rows, &Palette::new(ALPHABET).unwrap()).unwrap()
    }

    #[test]
    fn test_score_zone_layout() {
        let zone = ScoreZone::new(5, 6);
        assert_eq!(
            zone.locs(),
            &[
                Loc::new(2, 0),
                Loc::new(2, 1),
                Loc::new(2, 3),
                Loc::new(2, 4),
                Loc::new(3, 0),
                Loc::new(3, 1),
                Loc::new(3, 3),
                Loc::new(3, 4),
            ]
        );
        assert!(zone.contains(Loc::new(3, 4)));
        assert!(!zone.contains(Loc::new(3, 2)));
        assert!(!zone.contains(Loc::new(1, 0)));
    }

    #[test]
    fn test_score_zone_narrow_and_short_boards() {
        let narrow = ScoreZone::new(3, 5);
        assert_eq!(
            narrow.locs(),
            &[Loc::new(2, 0), Loc::new(2, 1), Loc::new(2, 2)]
        );
        assert!(ScoreZone::new(3, 3).locs().is_empty());
        assert!(ScoreZone::new(0, 0).locs().is_empty());
    }

    #[test]
    fn test_empty_board_info() {
        let board = Board::new_empty(5, 5);
        let info = analyzer_for(&board, 3).compute_info(&board);
        assert_eq!(info.num_groups, 0);
        assert_eq!(info.num_empty, 25);
        assert_eq!(info.best_size, 0);
        assert_eq!(info.best_loc, None);
        assert_eq!(info.need, 25, "No zone groups: need falls back to the cell count");
        assert_eq!(info.score_val, 0);
        assert_eq!(info.num_scorable, 0);
        assert_eq!(info.num_weak_groups, 0);
        assert_eq!(info.num_small_groups, 0);
        assert_eq!(info.num_field_groups, 0);
    }

    #[test]
    fn test_block_straddling_score_zone() {
        let board = parse(&[
            "bcdef", //
            "aaghi", //
            "aajkl", //
            "mnopq", //
            "rstuv", //
        ]);
        let info = analyzer_for(&board, 3).compute_info(&board);
        assert_eq!(info.num_groups, 22);
        assert_eq!(info.num_empty, 0);
        assert_eq!(info.best_size, 4);
        assert_eq!(info.best_loc, Some(Loc::new(2, 0)));
        // 'a' is the first color: value 2.
        assert_eq!(info.best_points, 8);
        assert_eq!(info.num_score_groups, 3);
        assert_eq!(info.num_scorable, 1);
        assert_eq!(info.score_val, (4 + 1 + 1) * 10 / 3);
        assert_eq!(info.need, -1);
        assert_eq!(info.num_small_groups, 22);
        assert_eq!(info.num_weak_groups, 22);
        assert_eq!(info.num_field_groups, 19);
    }

    #[test]
    fn test_best_size_prefers_largest_group() {
        let board = parse(&[
            "abcd", //
            "exyf", //
            "gxyh", //
            "ixyj", //
            "kxlm", //
            "nopq", //
        ]);
        let info = analyzer_for(&board, 3).compute_info(&board);
        assert_eq!(info.best_size, 4, "The size-4 'x' group beats the size-3 'y' group");
        assert_eq!(info.best_loc, Some(Loc::new(2, 1)));
        assert_eq!(info.num_scorable, 2);
        assert_eq!(info.num_score_groups, 6);
        assert_eq!(info.score_val, 110 / 6);
        assert_eq!(info.need, -1);
        assert_eq!(info.num_groups, 19);
        assert_eq!(info.num_field_groups, 13);
        // 'x' is at position 23: value 25.
        assert_eq!(info.best_points, 25 * 4);
    }

    #[test]
    fn test_need_without_scorable_groups() {
        let board = parse(&[
            "ab.", //
            "cd.", //
            "ef.", //
            "gh.", //
            "ij.", //
        ]);
        let info = analyzer_for(&board, 4).compute_info(&board);
        assert_eq!(info.num_empty, 5);
        assert_eq!(info.best_size, 0);
        assert_eq!(info.best_loc, None);
        assert_eq!(info.num_score_groups, 2);
        assert_eq!(info.need, 3);
        assert_eq!(info.score_val, 10);
    }

    #[test]
    fn test_weak_groups_use_diagonals() {
        let board = parse(&[
            "ab", //
            "ba", //
        ]);
        let analyzer = analyzer_for(&board, 3);
        let info = analyzer.compute_info(&board);
        assert_eq!(info.num_groups, 4);
        assert_eq!(info.num_weak_groups, 2);
    }

    #[test]
    fn test_weak_groups_ignore_empty_and_distant_cells() {
        let board = parse(&[
            "a.a", //
            "...", //
            "a.a", //
        ]);
        let analyzer = analyzer_for(&board, 3);
        assert_eq!(analyzer.weak_groups(&board), 4);

        let chain = parse(&[
            "a..", //
            ".a.", //
            "..a", //
        ]);
        assert_eq!(analyzer.weak_groups(&chain), 1);
        assert_eq!(analyzer.compute_info(&chain).num_groups, 3);
    }

    // Counts same-color components where all eight neighbors touch.
    fn count_eight_connected(board: &Board) -> usize {
        let mut seen = vec![vec![false; board.width()]; board.height()];
        let mut count = 0;
        for start in board.occupied_locs() {
            if seen[start.row][start.col] {
                continue;
            }
            count += 1;
            seen[start.row][start.col] = true;
            let color = board.cell(start);
            let mut queue = std::collections::VecDeque::from([start]);
            while let Some(loc) = queue.pop_front() {
                for dr in -1isize..=1 {
                    for dc in -1isize..=1 {
                        let row = loc.row as isize + dr;
                        let col = loc.col as isize + dc;
                        if row < 0 || col < 0 {
                            continue;
                        }
                        let next = Loc::new(row as usize, col as usize);
                        if board.contains(next)
                            && !seen[next.row][next.col]
                            && board.cell(next) == color
                        {
                            seen[next.row][next.col] = true;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_weak_groups_are_eight_connected() {
        let edge = parse(&[
            ".a", //
            "a.", //
        ]);
        assert_eq!(analyzer_for(&edge, 3).weak_groups(&edge), 1);

        let palette = Palette::new("abc").unwrap();
        for seed in 0..50 {
            let board = Board::random_with_seed(7, 6, 3, seed);
            let analyzer = BoardAnalyzer::new(7, 6, 3, palette.clone());
            assert_eq!(
                analyzer.weak_groups(&board),
                count_eight_connected(&board),
                "seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_small_groups_bound() {
        let board = parse(&[
            "aaaaa", //
            "bbbbc", //
            ".....", //
        ]);
        let info = analyzer_for(&board, 3).compute_info(&board);
        assert_eq!(info.num_groups, 3);
        assert_eq!(info.num_small_groups, 2, "Only the size-5 'a' group is not small");
    }

    #[test]
    fn test_best_loc_lies_in_best_group() {
        let palette = Palette::new("abc").unwrap();
        for seed in 0..50 {
            let board = Board::random_with_seed(7, 8, 3, seed);
            let analyzer = BoardAnalyzer::new(7, 8, 3, palette.clone());
            let info = analyzer.compute_info(&board);
            assert_eq!(info.best_loc.is_some(), info.best_size > 0, "seed {}", seed);
            if let Some(loc) = info.best_loc {
                assert!(analyzer.score_zone().contains(loc));
                let (mut groups, _) = analyzer.group_index(&board);
                let group = groups.group_of(loc);
                assert_eq!(groups.size_of(group), info.best_size, "seed {}", seed);
                assert!(groups.members(group).contains(&loc));
            }
        }
    }

    #[test]
    fn test_info_invariants_on_random_boards() {
        let palette = Palette::new("abcd").unwrap();
        for seed in 0..50 {
            let board = Board::random_with_seed(6, 6, 4, seed);
            let analyzer = BoardAnalyzer::new(6, 6, 3, palette.clone());
            let info = analyzer.compute_info(&board);
            assert_eq!(
                info.num_field_groups + info.num_score_groups,
                info.num_groups,
                "seed {}",
                seed
            );
            assert!(info.num_weak_groups <= info.num_groups, "seed {}", seed);
            assert!(info.num_small_groups <= info.num_groups, "seed {}", seed);
            assert_eq!(info.num_empty, board.count_empty());
            assert!(info.num_scorable <= info.num_score_groups);
            assert_eq!(
                analyzer.compute_info(&board),
                info,
                "Recomputing must give the same info (seed {})",
                seed
            );
        }
    }
}
