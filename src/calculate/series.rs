//! Chart-ready point series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CharacterId, Entry};

use super::{Color, RankingError};

/// One snapshot plotted as `(time, points)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    /// Snapshot day
    pub date: NaiveDate,

    /// Milliseconds since the Unix epoch at midnight UTC of `date`
    pub t: i64,

    /// Cumulative points
    pub y: u64,
}

/// One character's line on the progress chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub id: CharacterId,
    pub label: String,
    pub color: Color,
    pub fill: bool,
    pub line_tension: f64,
    pub points: Vec<SeriesPoint>,
}

/// All series for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartDataset {
    pub series: Vec<ChartSeries>,
}

impl ChartDataset {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Build one series per page entry, colored by position.
///
/// Snapshots are passed through in record order with no interpolation
/// or resampling.
pub fn compose(page: &[&Entry], colors: &[Color]) -> Result<ChartDataset, RankingError> {
    if colors.len() != page.len() {
        return Err(RankingError::PaletteMismatch {
            expected: page.len(),
            actual: colors.len(),
        });
    }

    let series = page
        .iter()
        .zip(colors)
        .map(|(entry, &color)| ChartSeries {
            id: entry.id().clone(),
            label: entry.name().to_string(),
            color,
            fill: false,
            line_tension: 0.0,
            points: entry
                .records
                .iter()
                .map(|r| SeriesPoint {
                    date: r.date,
                    t: r.timestamp_millis(),
                    y: r.point,
                })
                .collect(),
        })
        .collect();

    Ok(ChartDataset { series })
}
