use crate::criteria::{CriteriaSpec, Verdict};
use crate::engine::{Board, Loc, Palette};
use crate::error::{Result, SolverError};
use crate::heuristics::{BoardAnalyzer, BoardInfo};
use log::{debug, trace};
use std::fmt;
use std::path::Path;

/// Score thresholds below this are raised to it.
pub const MIN_SCORE_FLOOR: usize = 3;

/// The single move chosen by one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Exchange the contents of two cells.
    Swap(Loc, Loc),
    /// Claim the score-zone group containing this cell.
    Score(Loc),
}

impl fmt::Display for Action {
    /// Formats the action as a protocol line: `SWAP r1 c1 r2 c2` or `SCORE r c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Swap(a, b) => write!(f, "SWAP {} {}", a, b),
            Action::Score(loc) => write!(f, "SCORE {}", loc),
        }
    }
}

/// Construction parameters for a `MoveEngine`.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Minimum group size that may be claimed; clamped to `MIN_SCORE_FLOOR`.
    pub min_score: usize,
    pub palette: Palette,
}

/// Chooses the best next action for a board.
///
/// The engine holds only its configuration and the two criteria lists; each
/// call to `choose_action` is independent of the previous ones.
#[derive(Clone, Debug)]
pub struct MoveEngine {
    analyzer: BoardAnalyzer,
    normal: CriteriaSpec,
    panic: CriteriaSpec,
}

impl MoveEngine {
    pub fn new(config: EngineConfig, normal: CriteriaSpec, panic: CriteriaSpec) -> Self {
        let min_score = config.min_score.max(MIN_SCORE_FLOOR);
        MoveEngine {
            analyzer: BoardAnalyzer::new(config.width, config.height, min_score, config.palette),
            normal,
            panic,
        }
    }

    /// Builds an engine using the default ordering for both modes.
    pub fn with_default_criteria(config: EngineConfig) -> Self {
        MoveEngine::new(config, CriteriaSpec::default(), CriteriaSpec::default())
    }

    /// Builds an engine from two criteria files (see [`CriteriaSpec::load_or_default`]).
    pub fn load(config: EngineConfig, normal_path: &Path, panic_path: &Path) -> Result<Self> {
        let normal = CriteriaSpec::load_or_default(normal_path)?;
        let panic = CriteriaSpec::load_or_default(panic_path)?;
        debug!("normal criteria {}, panic criteria {}", normal, panic);
        Ok(MoveEngine::new(config, normal, panic))
    }

    pub fn analyzer(&self) -> &BoardAnalyzer {
        &self.analyzer
    }

    pub fn min_score(&self) -> usize {
        self.analyzer.min_score()
    }

    pub fn normal_criteria(&self) -> &CriteriaSpec {
        &self.normal
    }

    pub fn panic_criteria(&self) -> &CriteriaSpec {
        &self.panic
    }

    /// Computes `BoardInfo` after checking that the board has the engine's size.
    pub fn compute_info(&self, board: &Board) -> Result<BoardInfo> {
        self.check_size(board)?;
        Ok(self.analyzer.compute_info(board))
    }

    /// Panic mode kicks in when the zone needs at least a fifth of the free cells.
    pub fn is_panic(info: &BoardInfo) -> bool {
        info.need >= (info.num_empty / 5) as i64
    }

    /// Criteria list used for a board summarized by `info`.
    pub fn active_criteria(&self, info: &BoardInfo) -> &CriteriaSpec {
        if MoveEngine::is_panic(info) {
            &self.panic
        } else {
            &self.normal
        }
    }

    /// Decides the next action for `board`.
    ///
    /// A qualifying score-zone group is claimed immediately. Otherwise every
    /// pair of differently colored cells is tried as a swap, in row-major pair
    /// order, and the first candidate that is strictly better than every
    /// earlier one under the active criteria wins. If nothing improves on the
    /// current board, the first differently colored pair is returned.
    ///
    /// # Errors
    /// Fails if the board size does not match the engine, or if fewer than two
    /// cells are occupied when a swap is needed.
    ///
    /// # Examples
    /// ```
    /// use swapmatch_solver::engine::{Loc, Palette};
    /// use swapmatch_solver::solver::{Action, EngineConfig, MoveEngine};
    /// use swapmatch_solver::utils::board_from_str_array;
    ///
    /// let palette = Palette::new("abcdefghijklmnopqrstuvwxyz").unwrap();
    /// let board = board_from_str_array(
    ///     &["bcdef", "aaghi", "AAjkl", "mnopq", "rstuv"],
    ///     &palette,
    /// )
    /// .unwrap();
    /// let engine = MoveEngine::with_default_criteria(EngineConfig {
    ///     width: 5,
    ///     height: 5,
    ///     min_score: 3,
    ///     palette,
    /// });
    /// let action = engine.choose_action(&board).unwrap();
    /// assert_eq!(action, Action::Score(Loc::new(2, 0)));
    /// assert_eq!(action.to_string(), "SCORE 2 0");
    /// ```
    pub fn choose_action(&self, board: &Board) -> Result<Action> {
        let before = self.compute_info(board)?;

        if before.best_size >= self.min_score() {
            if let Some(loc) = before.best_loc {
                debug!("scoring group of size {} at ({})", before.best_size, loc);
                return Ok(Action::Score(loc));
            }
        }

        let panic_mode = MoveEngine::is_panic(&before);
        let spec = self.active_criteria(&before);
        debug!(
            "searching swaps in {} mode with {} (need {}, empty {})",
            if panic_mode { "panic" } else { "normal" },
            spec,
            before.need,
            before.num_empty
        );

        let locs = board.occupied_locs();
        if locs.len() < 2 {
            return Err(SolverError::NotEnoughCells(locs.len()));
        }

        let mut working = board.clone();
        let mut best_pair: Option<(Loc, Loc)> = None;
        // First pair that actually changes the board.
        let mut first_pair: Option<(Loc, Loc)> = None;
        let mut best_info = before;

        for (i, &a) in locs.iter().enumerate() {
            for &b in &locs[i + 1..] {
                if working.cell(a) == working.cell(b) {
                    continue;
                }
                if first_pair.is_none() {
                    first_pair = Some((a, b));
                }

                working.swap(a, b);
                let after = self.analyzer.compute_info(&working);
                working.swap(a, b);

                if let Some((metric, Verdict::Better)) = spec.deciding_metric(&after, &best_info) {
                    trace!("swap ({}) <-> ({}) improves {}", a, b, metric);
                    best_pair = Some((a, b));
                    best_info = after;
                }
            }
        }

        // A single-colored board has no useful swap; fall back to the first two cells.
        let (a, b) = best_pair.or(first_pair).unwrap_or((locs[0], locs[1]));
        debug!("chose swap ({}) <-> ({})", a, b);
        Ok(Action::Swap(a, b))
    }

    fn check_size(&self, board: &Board) -> Result<()> {
        if board.width() != self.analyzer.width() || board.height() != self.analyzer.height() {
            return Err(SolverError::BoardSize {
                width: self.analyzer.width(),
                height: self.analyzer.height(),
                found_width: board.width(),
                found_height: board.height(),
            });
        }
        Ok(())
    }
}
