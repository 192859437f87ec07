//! Ordered metric lists and the lexicographic comparison built on them.
//!
//! A `CriteriaSpec` is a priority-ordered list of `Metric`s. Comparing two
//! `BoardInfo`s walks the list and stops at the first metric whose values
//! differ. Ordinary metrics prefer the smaller value; the inverted metrics
//! (`bestSize`, `numScorable`, `scoreVal`) prefer the larger one.
use crate::error::{Result, SolverError};
use crate::heuristics::BoardInfo;
use log::info;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One selectable `BoardInfo` field.
///
/// The discriminant is the id used in criteria files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    NumGroups = 0,
    NumEmpty = 1,
    Need = 2,
    ScoreVal = 3,
    BestSize = 4,
    NumScoreGroups = 5,
    NumScorable = 6,
    NumWeakGroups = 7,
    NumSmallGroups = 8,
    NumFieldGroups = 9,
}

impl Metric {
    /// Every metric, in id order.
    pub const ALL: [Metric; 10] = [
        Metric::NumGroups,
        Metric::NumEmpty,
        Metric::Need,
        Metric::ScoreVal,
        Metric::BestSize,
        Metric::NumScoreGroups,
        Metric::NumScorable,
        Metric::NumWeakGroups,
        Metric::NumSmallGroups,
        Metric::NumFieldGroups,
    ];

    /// Looks up a metric by its criteria-file id.
    pub fn from_id(id: u32) -> Result<Metric> {
        Metric::ALL
            .get(id as usize)
            .copied()
            .ok_or(SolverError::UnknownMetric(id))
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::NumGroups => "numGroups",
            Metric::NumEmpty => "numEmpty",
            Metric::Need => "need",
            Metric::ScoreVal => "scoreVal",
            Metric::BestSize => "bestSize",
            Metric::NumScoreGroups => "numScoreGroups",
            Metric::NumScorable => "numScorable",
            Metric::NumWeakGroups => "numWeakGroups",
            Metric::NumSmallGroups => "numSmallGroups",
            Metric::NumFieldGroups => "numFieldGroups",
        }
    }

    /// Inverted metrics are compared in reverse: larger values win.
    ///
    /// This is a property of the metric, independent of the list it appears in.
    pub fn is_inverted(self) -> bool {
        matches!(
            self,
            Metric::BestSize | Metric::NumScorable | Metric::ScoreVal
        )
    }

    /// Reads this metric's value from `info`.
    pub fn value(self, info: &BoardInfo) -> i64 {
        match self {
            Metric::NumGroups => info.num_groups as i64,
            Metric::NumEmpty => info.num_empty as i64,
            Metric::Need => info.need,
            Metric::ScoreVal => info.score_val as i64,
            Metric::BestSize => info.best_size as i64,
            Metric::NumScoreGroups => info.num_score_groups as i64,
            Metric::NumScorable => info.num_scorable as i64,
            Metric::NumWeakGroups => info.num_weak_groups as i64,
            Metric::NumSmallGroups => info.num_small_groups as i64,
            Metric::NumFieldGroups => info.num_field_groups as i64,
        }
    }

    /// Orders `after` against `before` so that `Greater` means `after` is preferable.
    fn rank(self, after: &BoardInfo, before: &BoardInfo) -> Ordering {
        let (a, b) = (self.value(after), self.value(before));
        if self.is_inverted() {
            a.cmp(&b)
        } else {
            b.cmp(&a)
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of comparing a candidate board against the incumbent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Better,
    Worse,
    Tie,
}

/// Priority-ordered list of metrics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriteriaSpec {
    metrics: Vec<Metric>,
}

impl CriteriaSpec {
    /// Ordering used when no criteria file is available.
    pub const DEFAULT: [Metric; 3] = [Metric::NumScorable, Metric::NumGroups, Metric::Need];

    pub fn new(metrics: Vec<Metric>) -> Self {
        CriteriaSpec { metrics }
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Loads a criteria file, falling back to the default ordering when the file
    /// does not exist.
    ///
    /// Any other read failure and any bad id is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => content.parse(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "criteria file {} not found, using default ordering",
                    path.display()
                );
                Ok(CriteriaSpec::default())
            }
            Err(source) => Err(SolverError::CriteriaIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Finds the first metric on which the two boards differ.
    ///
    /// Returns `None` when every metric ties. Later metrics are never read once
    /// one has decided.
    pub fn deciding_metric(&self, after: &BoardInfo, before: &BoardInfo) -> Option<(Metric, Verdict)> {
        self.metrics.iter().find_map(|&metric| match metric.rank(after, before) {
            Ordering::Greater => Some((metric, Verdict::Better)),
            Ordering::Less => Some((metric, Verdict::Worse)),
            Ordering::Equal => None,
        })
    }

    /// Decides whether `after` is strictly better, strictly worse, or tied with `before`.
    ///
    /// # Examples
    /// ```
    /// use swapmatch_solver::criteria::{CriteriaSpec, Verdict};
    /// use swapmatch_solver::engine::{Board, Palette};
    /// use swapmatch_solver::solver::{EngineConfig, MoveEngine};
    ///
    /// let engine = MoveEngine::with_default_criteria(EngineConfig {
    ///     width: 3,
    ///     height: 3,
    ///     min_score: 3,
    ///     palette: Palette::new("ab").unwrap(),
    /// });
    /// let info = engine.compute_info(&Board::new_empty(3, 3)).unwrap();
    /// assert_eq!(CriteriaSpec::default().compare(&info, &info), Verdict::Tie);
    /// ```
    pub fn compare(&self, after: &BoardInfo, before: &BoardInfo) -> Verdict {
        self.deciding_metric(after, before)
            .map_or(Verdict::Tie, |(_, verdict)| verdict)
    }
}

impl Default for CriteriaSpec {
    fn default() -> Self {
        CriteriaSpec::new(CriteriaSpec::DEFAULT.to_vec())
    }
}

impl FromStr for CriteriaSpec {
    type Err = SolverError;

    /// Parses whitespace-separated metric ids, e.g. `"6 0 2"`.
    fn from_str(s: &str) -> Result<Self> {
        let metrics = s
            .split_whitespace()
            .map(|token| {
                let id: u32 = token
                    .parse()
                    .map_err(|_| SolverError::InvalidCriteriaToken(token.to_string()))?;
                Metric::from_id(id)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CriteriaSpec::new(metrics))
    }
}

impl fmt::Display for CriteriaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.metrics.iter().map(|m| m.name()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
