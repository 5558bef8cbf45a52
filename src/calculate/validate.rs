//! Dataset irregularity report.
//!
//! The dataset is an authoritative historical record, so nothing here
//! repairs or rejects data. Issues are listed for the operator only.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CharacterId, Entry, Kind};

/// A single data irregularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DataIssue {
    /// Entry has no snapshots and is left out of every leaderboard
    NoRecords { id: CharacterId, name: String },

    /// Snapshot dates are not strictly ascending
    DatesNotAscending {
        id: CharacterId,
        name: String,
        date: NaiveDate,
        previous: NaiveDate,
    },

    /// Cumulative points went down between two snapshots
    PointsDecreased {
        id: CharacterId,
        name: String,
        date: NaiveDate,
        from: u64,
        to: u64,
    },

    /// Several entries of one kind share a current rank
    DuplicateRank {
        kind: Kind,
        rank: u32,
        ids: Vec<CharacterId>,
    },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::NoRecords { id, name } => {
                write!(f, "{} ({}): no snapshots", name, id)
            }
            DataIssue::DatesNotAscending {
                id,
                name,
                date,
                previous,
            } => write!(
                f,
                "{} ({}): snapshot {} follows {}",
                name, id, date, previous
            ),
            DataIssue::PointsDecreased {
                id,
                name,
                date,
                from,
                to,
            } => write!(
                f,
                "{} ({}): points fell from {} to {} on {}",
                name, id, from, to, date
            ),
            DataIssue::DuplicateRank { kind, rank, ids } => {
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                write!(f, "{} rank {} shared by {}", kind, rank, ids.join(", "))
            }
        }
    }
}

/// Scan a dataset for irregularities.
pub fn check_dataset(entries: &[Entry]) -> Vec<DataIssue> {
    let mut issues = Vec::new();
    let mut by_rank: BTreeMap<(Kind, u32), Vec<CharacterId>> = BTreeMap::new();

    for entry in entries {
        let Some(latest) = entry.latest() else {
            issues.push(DataIssue::NoRecords {
                id: entry.id().clone(),
                name: entry.name().to_string(),
            });
            continue;
        };

        for pair in entry.records.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.date <= prev.date {
                issues.push(DataIssue::DatesNotAscending {
                    id: entry.id().clone(),
                    name: entry.name().to_string(),
                    date: next.date,
                    previous: prev.date,
                });
            }
            if next.point < prev.point {
                issues.push(DataIssue::PointsDecreased {
                    id: entry.id().clone(),
                    name: entry.name().to_string(),
                    date: next.date,
                    from: prev.point,
                    to: next.point,
                });
            }
        }

        by_rank
            .entry((entry.kind(), latest.rank))
            .or_default()
            .push(entry.id().clone());
    }

    for ((kind, rank), ids) in by_rank {
        if ids.len() > 1 {
            issues.push(DataIssue::DuplicateRank {
                kind,
                rank,
                ids,
            });
        }
    }

    issues
}
