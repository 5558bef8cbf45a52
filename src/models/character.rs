//! Character and time-series entry models.

use serde::{Deserialize, Serialize};

use super::{CharacterId, Kind, Record};

/// A competing character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier (derived from name + kind when the dataset omits it)
    #[serde(default = "empty_id")]
    pub id: CharacterId,

    /// Display name
    pub name: String,

    /// Leaderboard the character competes in
    pub kind: Kind,
}

fn empty_id() -> CharacterId {
    CharacterId::from("")
}

impl Character {
    /// Create a new Character with an auto-generated ID.
    pub fn new(name: String, kind: Kind) -> Self {
        let id = CharacterId::generate(&[&name, kind.as_str()]);
        Self { id, name, kind }
    }

    /// Builder method to set an explicit ID.
    pub fn with_id(mut self, id: impl Into<CharacterId>) -> Self {
        self.id = id.into();
        self
    }
}

/// A character together with its snapshot history.
///
/// `records` is ordered by ascending date; the last record is the current
/// standing. Ordering and point monotonicity come from upstream data and
/// are not enforced here.
///
/// On the wire the character fields sit at the top level next to
/// `records`: `{"id":..,"name":..,"kind":..,"records":[..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub character: Character,

    #[serde(default)]
    pub records: Vec<Record>,
}

impl Entry {
    pub fn new(character: Character, records: Vec<Record>) -> Self {
        Self { character, records }
    }

    pub fn id(&self) -> &CharacterId {
        &self.character.id
    }

    pub fn name(&self) -> &str {
        &self.character.name
    }

    pub fn kind(&self) -> Kind {
        self.character.kind
    }

    /// Whether the entry has at least one snapshot and can be ranked.
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// The current (last) snapshot.
    pub fn latest(&self) -> Option<&Record> {
        self.records.last()
    }

    /// The snapshot before the current one.
    pub fn previous(&self) -> Option<&Record> {
        self.records.len().checked_sub(2).map(|i| &self.records[i])
    }

    pub fn current_rank(&self) -> Option<u32> {
        self.latest().map(|r| r.rank)
    }

    pub fn current_point(&self) -> Option<u64> {
        self.latest().map(|r| r.point)
    }

    /// Fill in a deterministic ID when the dataset left it blank.
    pub fn ensure_id(&mut self) {
        if self.character.id.is_empty() {
            self.character.id =
                CharacterId::generate(&[&self.character.name, self.character.kind.as_str()]);
        }
    }
}
