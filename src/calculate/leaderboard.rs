//! Kind-filtered, rank-sorted, paginated leaderboards.

use std::ops::Range;

use crate::models::{CharacterId, Entry, Kind};

use super::{EntryMetrics, RankingError};

/// Entries of `kind` that have snapshots, sorted ascending by current rank.
///
/// The sort is stable: entries sharing a rank keep their dataset order.
pub fn rank_by_kind(entries: &[Entry], kind: Kind) -> Vec<&Entry> {
    let mut ranked: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.kind() == kind && e.has_records())
        .collect();
    ranked.sort_by_key(|e| e.current_rank().unwrap_or(u32::MAX));
    ranked
}

/// A page of one kind's leaderboard.
#[derive(Debug, Clone)]
pub struct Leaderboard<'a> {
    kind: Kind,
    page_index: usize,
    page_size: usize,
    filtered: Vec<&'a Entry>,
    page: Range<usize>,
}

/// A visible row together with the entry ranked directly above it.
#[derive(Debug, Clone, Copy)]
pub struct LeaderboardRow<'a> {
    pub entry: &'a Entry,
    pub above: Option<&'a Entry>,
    pub metrics: EntryMetrics,
}

impl<'a> Leaderboard<'a> {
    /// Build page `page_index` (0-based) of `kind`'s leaderboard.
    ///
    /// A page past the end is empty, not an error.
    pub fn build(
        entries: &'a [Entry],
        kind: Kind,
        page_index: usize,
        page_size: usize,
    ) -> Result<Self, RankingError> {
        if page_size == 0 {
            return Err(RankingError::InvalidPageSize);
        }

        let filtered = rank_by_kind(entries, kind);
        let page = page_range(filtered.len(), page_index, page_size);

        Ok(Self {
            kind,
            page_index,
            page_size,
            filtered,
            page,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Every ranked entry of the kind, across all pages.
    pub fn filtered(&self) -> &[&'a Entry] {
        &self.filtered
    }

    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size)
    }

    pub fn page(&self) -> &[&'a Entry] {
        &self.filtered[self.page.clone()]
    }

    /// The entry one position above each page entry, aligned with `page()`.
    ///
    /// The first row of a later page points at the last row of the page
    /// before it; only the overall leader has no neighbor.
    pub fn above_neighbors(&self) -> Vec<Option<&'a Entry>> {
        self.page
            .clone()
            .map(|i| i.checked_sub(1).map(|above| self.filtered[above]))
            .collect()
    }

    /// Page rows with derived metrics.
    pub fn rows(&self) -> Vec<LeaderboardRow<'a>> {
        self.page()
            .iter()
            .zip(self.above_neighbors())
            .filter_map(|(&entry, above)| {
                EntryMetrics::derive(entry, above).map(|metrics| LeaderboardRow {
                    entry,
                    above,
                    metrics,
                })
            })
            .collect()
    }

    /// A character's entry and the entry ranked directly above it,
    /// looked up across the whole leaderboard rather than the page.
    pub fn standing(&self, id: &CharacterId) -> Option<(&'a Entry, Option<&'a Entry>)> {
        let position = self.filtered.iter().position(|e| e.id() == id)?;
        let above = position.checked_sub(1).map(|i| self.filtered[i]);
        Some((self.filtered[position], above))
    }
}

fn page_range(len: usize, page_index: usize, page_size: usize) -> Range<usize> {
    match page_index.checked_mul(page_size) {
        Some(start) if start < len => start..start.saturating_add(page_size).min(len),
        _ => len..len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{entry, ranked};
    use pretty_assertions::assert_eq;

    fn names(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string()).collect()
    }

    /// Eleven local entries ranked 1..=11, shuffled, plus some company entries.
    fn dataset() -> Vec<Entry> {
        let mut entries = Vec::new();
        for rank in [7, 2, 11, 4, 1, 9, 3, 10, 5, 8, 6] {
            entries.push(ranked(&format!("local-{rank}"), Kind::Local, rank));
        }
        for rank in [2, 1, 3] {
            entries.push(ranked(&format!("company-{rank}"), Kind::Company, rank));
        }
        entries
    }

    #[test]
    fn test_filter_keeps_exactly_the_kind() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Company, 0, 10).unwrap();

        assert_eq!(board.total(), 3);
        assert!(board.filtered().iter().all(|e| e.kind() == Kind::Company));

        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();
        assert_eq!(board.total(), 11);
        assert!(board.filtered().iter().all(|e| e.kind() == Kind::Local));
    }

    #[test]
    fn test_sorted_ascending_by_current_rank() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();

        let ranks: Vec<u32> = board
            .filtered()
            .iter()
            .map(|e| e.current_rank().unwrap())
            .collect();
        assert_eq!(ranks, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_uses_latest_snapshot() {
        let entries = vec![
            entry("riser", Kind::Local, &[(5, 10), (1, 90)]),
            entry("faller", Kind::Local, &[(1, 50), (2, 60)]),
        ];
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();
        assert_eq!(names(board.filtered()), vec!["riser", "faller"]);
    }

    #[test]
    fn test_tied_ranks_keep_dataset_order() {
        let entries = vec![
            ranked("b", Kind::Local, 2),
            ranked("first-tie", Kind::Local, 1),
            ranked("second-tie", Kind::Local, 1),
        ];
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();
        assert_eq!(names(board.filtered()), vec!["first-tie", "second-tie", "b"]);
    }

    #[test]
    fn test_entries_without_records_are_excluded() {
        let entries = vec![
            ranked("ranked", Kind::Local, 1),
            entry("empty", Kind::Local, &[]),
        ];
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();
        assert_eq!(names(board.filtered()), vec!["ranked"]);
    }

    #[test]
    fn test_first_page() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();

        let ranks: Vec<u32> = board
            .page()
            .iter()
            .map(|e| e.current_rank().unwrap())
            .collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());

        let above = board.above_neighbors();
        assert_eq!(above.len(), 10);
        assert!(above[0].is_none());
        assert_eq!(above[5].unwrap().current_rank(), Some(5));
        assert_eq!(above[9].unwrap().current_rank(), Some(9));
    }

    #[test]
    fn test_short_last_page_neighbor_crosses_boundary() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Local, 1, 10).unwrap();

        assert_eq!(names(board.page()), vec!["local-11"]);
        let above = board.above_neighbors();
        assert_eq!(above.len(), 1);
        assert_eq!(above[0].unwrap().name(), "local-10");
    }

    #[test]
    fn test_neighbor_of_first_row_on_every_page() {
        let entries = dataset();
        for page_index in 1..4 {
            let board = Leaderboard::build(&entries, Kind::Local, page_index, 3).unwrap();
            let above = board.above_neighbors();
            let expected = board.filtered()[page_index * 3 - 1];
            assert_eq!(above[0].unwrap().id(), expected.id());
        }
    }

    #[test]
    fn test_page_out_of_range_is_empty() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Local, 2, 10).unwrap();
        assert!(board.page().is_empty());
        assert!(board.above_neighbors().is_empty());
        assert!(board.rows().is_empty());

        let board = Leaderboard::build(&entries, Kind::Local, usize::MAX, 10).unwrap();
        assert!(board.page().is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let entries = dataset();
        let err = Leaderboard::build(&entries, Kind::Local, 0, 0).unwrap_err();
        assert_eq!(err, RankingError::InvalidPageSize);
    }

    #[test]
    fn test_no_matching_entries() {
        let entries = vec![ranked("only-local", Kind::Local, 1)];
        for page_index in [0, 1, 5] {
            let board = Leaderboard::build(&entries, Kind::Company, page_index, 10).unwrap();
            assert!(board.filtered().is_empty());
            assert!(board.page().is_empty());
            assert!(board.above_neighbors().is_empty());
            assert_eq!(board.page_count(), 0);
        }
    }

    #[test]
    fn test_page_count() {
        let entries = dataset();
        assert_eq!(
            Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap().page_count(),
            2
        );
        assert_eq!(
            Leaderboard::build(&entries, Kind::Local, 0, 11).unwrap().page_count(),
            1
        );
    }

    #[test]
    fn test_rows_carry_gap_and_delta() {
        let entries = vec![
            entry("leader", Kind::Local, &[(1, 400), (1, 500)]),
            entry("chaser", Kind::Local, &[(2, 300), (2, 420)]),
        ];
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();
        let rows = board.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].metrics.gap_to_above, None);
        assert_eq!(rows[0].metrics.point_delta, 100);
        assert_eq!(rows[1].above.unwrap().name(), "leader");
        assert_eq!(rows[1].metrics.gap_to_above, Some(80));
        assert_eq!(rows[1].metrics.point_delta, 120);
    }

    #[test]
    fn test_standing_ignores_page_bounds() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Local, 0, 2).unwrap();
        let target = entries.iter().find(|e| e.name() == "local-4").unwrap();

        let (entry, above) = board.standing(target.id()).unwrap();
        assert_eq!(entry.name(), "local-4");
        assert_eq!(above.unwrap().name(), "local-3");
        assert!(board.standing(&"missing".into()).is_none());
    }

    #[test]
    fn test_standing_of_leader_has_no_above() {
        let entries = dataset();
        let board = Leaderboard::build(&entries, Kind::Local, 0, 10).unwrap();
        let leader = board.filtered()[0];

        let (_, above) = board.standing(leader.id()).unwrap();
        assert!(above.is_none());
    }
}
