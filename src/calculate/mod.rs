//! Ranking calculation engine.
//!
//! Pure transformations over a loaded dataset:
//! - Leaderboards (filter by kind, sort by current rank, paginate)
//! - Per-entry metrics (points gained, gap to the entry ranked above)
//! - Deterministic series colors
//! - Chart-ready series
//!
//! Nothing here performs I/O or mutates its input.

pub mod leaderboard;
pub mod palette;
pub mod series;
pub mod validate;
pub mod view;

pub use leaderboard::{rank_by_kind, Leaderboard, LeaderboardRow};
pub use palette::{palette, Color, MAX_DISTINCT_COLORS};
pub use series::{compose, ChartDataset, ChartSeries, SeriesPoint};
pub use validate::{check_dataset, DataIssue};
pub use view::{CharacterDetail, PaginationInfo, RankingRow, RankingView};

use serde::Serialize;
use thiserror::Error;

use crate::models::Entry;

/// Caller contract violations. Data irregularities are never reported here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("Page size must be greater than 0")]
    InvalidPageSize,

    #[error("Page numbers start at 1, got {0}")]
    InvalidPageNumber(usize),

    #[error("Expected {expected} colors for the page, got {actual}")]
    PaletteMismatch { expected: usize, actual: usize },
}

/// Points gained since the previous snapshot.
///
/// With a single snapshot the whole total counts as gained. Decreasing
/// totals yield a negative delta. Returns `None` when the entry has no
/// snapshots.
pub fn point_delta(entry: &Entry) -> Option<i64> {
    let latest = entry.latest()?;
    let previous = entry.previous().map_or(0, |r| r.point);
    Some(signed_difference(latest.point, previous))
}

/// Points between an entry and the entry ranked one above it.
///
/// `None` when there is no entry above (top of the leaderboard) or either
/// side lacks snapshots. Negative gaps are passed through unchanged.
pub fn gap(entry: &Entry, above: Option<&Entry>) -> Option<i64> {
    let above_point = above?.current_point()?;
    let point = entry.current_point()?;
    Some(signed_difference(above_point, point))
}

/// `a - b` as a signed value, saturating at the `i64` bounds for totals
/// that do not fit.
fn signed_difference(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    i64::try_from(diff).unwrap_or(if diff > 0 { i64::MAX } else { i64::MIN })
}

/// Derived figures for one leaderboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryMetrics {
    /// Current rank
    pub rank: u32,

    /// Current cumulative points
    pub point: u64,

    /// Points gained since the previous snapshot
    pub point_delta: i64,

    /// Points behind the entry ranked one above
    pub gap_to_above: Option<i64>,
}

impl EntryMetrics {
    /// Compute metrics for an entry and its one-rank-higher neighbor.
    pub fn derive(entry: &Entry, above: Option<&Entry>) -> Option<Self> {
        let latest = entry.latest()?;
        Some(Self {
            rank: latest.rank,
            point: latest.point,
            point_delta: point_delta(entry)?,
            gap_to_above: gap(entry, above),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::entry;
    use super::*;
    use crate::models::Kind;

    #[test]
    fn test_point_delta_single_snapshot_counts_from_zero() {
        let e = entry("Kumamon", Kind::Local, &[(5, 100)]);
        assert_eq!(point_delta(&e), Some(100));
    }

    #[test]
    fn test_point_delta_uses_last_two_snapshots() {
        let e = entry("Kumamon", Kind::Local, &[(9, 20), (6, 100), (5, 150)]);
        assert_eq!(point_delta(&e), Some(50));
    }

    #[test]
    fn test_point_delta_passes_through_decrease() {
        let e = entry("Glitch", Kind::Local, &[(3, 200), (4, 150)]);
        assert_eq!(point_delta(&e), Some(-50));
    }

    #[test]
    fn test_point_delta_no_snapshots() {
        let e = entry("Empty", Kind::Local, &[]);
        assert_eq!(point_delta(&e), None);
    }

    #[test]
    fn test_point_delta_saturates_for_huge_totals() {
        let up = entry("Up", Kind::Local, &[(2, 0), (1, u64::MAX)]);
        assert_eq!(point_delta(&up), Some(i64::MAX));

        let down = entry("Down", Kind::Local, &[(1, u64::MAX), (2, 0)]);
        assert_eq!(point_delta(&down), Some(i64::MIN));

        let base = i64::MAX as u64;
        let exact = entry("Exact", Kind::Local, &[(1, base + 5), (1, base + 7)]);
        assert_eq!(point_delta(&exact), Some(2));
    }

    #[test]
    fn test_gap_saturates_for_huge_totals() {
        let above = entry("Above", Kind::Local, &[(1, u64::MAX)]);
        let e = entry("Below", Kind::Local, &[(2, 1)]);
        assert_eq!(gap(&e, Some(&above)), Some(i64::MAX));
        assert_eq!(gap(&above, Some(&e)), Some(i64::MIN));
    }

    #[test]
    fn test_gap_without_neighbor() {
        let e = entry("Top", Kind::Local, &[(1, 900)]);
        assert_eq!(gap(&e, None), None);
    }

    #[test]
    fn test_gap_to_neighbor() {
        let above = entry("Above", Kind::Local, &[(1, 900)]);
        let e = entry("Below", Kind::Local, &[(2, 750)]);
        assert_eq!(gap(&e, Some(&above)), Some(150));
    }

    #[test]
    fn test_gap_can_be_negative() {
        let above = entry("Above", Kind::Local, &[(1, 500)]);
        let e = entry("Below", Kind::Local, &[(2, 620)]);
        assert_eq!(gap(&e, Some(&above)), Some(-120));
    }

    #[test]
    fn test_gap_neighbor_without_snapshots() {
        let above = entry("Empty", Kind::Local, &[]);
        let e = entry("Below", Kind::Local, &[(2, 620)]);
        assert_eq!(gap(&e, Some(&above)), None);
    }

    #[test]
    fn test_entry_metrics_derive() {
        let above = entry("Above", Kind::Local, &[(1, 300), (1, 400)]);
        let e = entry("Below", Kind::Local, &[(3, 100), (2, 340)]);

        let metrics = EntryMetrics::derive(&e, Some(&above)).unwrap();
        assert_eq!(
            metrics,
            EntryMetrics {
                rank: 2,
                point: 340,
                point_delta: 240,
                gap_to_above: Some(60),
            }
        );
    }

    #[test]
    fn test_entry_metrics_requires_snapshots() {
        let e = entry("Empty", Kind::Local, &[]);
        assert!(EntryMetrics::derive(&e, None).is_none());
    }
}
