//! Page-level views combining leaderboard rows, pagination and chart.
//!
//! Rows and chart series are built from the same page slice, so the table
//! and the chart always describe the same characters.

use serde::Serialize;

use crate::models::{CharacterId, Entry, Kind, Record};

use super::{compose, palette, ChartDataset, EntryMetrics, Leaderboard, RankingError};

/// One leaderboard table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingRow {
    pub id: CharacterId,
    pub name: String,
    pub rank: u32,
    pub point: u64,

    /// Points gained since the previous snapshot
    pub point_delta: i64,

    /// Points behind the character ranked one above, if any
    pub behind: Option<i64>,
}

/// Pagination metadata in views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    /// Characters in the whole leaderboard
    pub count: usize,
    pub page_index: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    fn from_leaderboard(board: &Leaderboard<'_>) -> Self {
        let page_count = board.page_count();
        Self {
            count: board.total(),
            page_index: board.page_index(),
            page_number: board.page_index() + 1,
            page_size: board.page_size(),
            page_count,
            has_next: board.page_index() + 1 < page_count,
            has_prev: board.page_index() > 0,
        }
    }
}

/// Everything needed to render one ranking page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingView {
    pub kind: Kind,
    pub kind_label: String,
    pub prefix: String,
    pub rows: Vec<RankingRow>,
    pub pagination: PaginationInfo,
    pub chart: ChartDataset,
}

impl RankingView {
    /// Build the view for `page_number` (1-based) of `kind`.
    pub fn build(
        entries: &[Entry],
        kind: Kind,
        page_number: usize,
        page_size: usize,
    ) -> Result<Self, RankingError> {
        let page_index = page_number
            .checked_sub(1)
            .ok_or(RankingError::InvalidPageNumber(page_number))?;
        let board = Leaderboard::build(entries, kind, page_index, page_size)?;

        let rows = board
            .rows()
            .into_iter()
            .map(|row| RankingRow {
                id: row.entry.id().clone(),
                name: row.entry.name().to_string(),
                rank: row.metrics.rank,
                point: row.metrics.point,
                point_delta: row.metrics.point_delta,
                behind: row.metrics.gap_to_above,
            })
            .collect();

        // palette(n) is a prefix of palette(page_size), so a row position
        // keeps its color on a short last page.
        let page = board.page();
        let chart = compose(page, &palette(page.len()))?;

        Ok(Self {
            kind,
            kind_label: kind.label().to_string(),
            prefix: kind.prefix().to_string(),
            rows,
            pagination: PaginationInfo::from_leaderboard(&board),
            chart,
        })
    }
}

/// A single character with its full history and current standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterDetail {
    pub id: CharacterId,
    pub name: String,
    pub kind: Kind,
    pub kind_label: String,
    pub metrics: EntryMetrics,

    /// Character ranked one above, if any
    pub above: Option<CharacterId>,
    pub records: Vec<Record>,
}

impl CharacterDetail {
    /// Look up a ranked character. `None` if unknown or without snapshots.
    pub fn build(entries: &[Entry], id: &CharacterId) -> Option<Self> {
        let kind = entries
            .iter()
            .find(|e| e.id() == id && e.has_records())?
            .kind();
        let board = Leaderboard::build(entries, kind, 0, 1).ok()?;
        let (entry, above) = board.standing(id)?;
        let metrics = EntryMetrics::derive(entry, above)?;

        Some(Self {
            id: entry.id().clone(),
            name: entry.name().to_string(),
            kind: entry.kind(),
            kind_label: entry.kind().label().to_string(),
            metrics,
            above: above.map(|e| e.id().clone()),
            records: entry.records.clone(),
        })
    }
}
