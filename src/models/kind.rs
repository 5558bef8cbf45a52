//! Character kinds. Each kind is an independent leaderboard.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed classification of characters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Regional mascots (ご当地)
    #[default]
    Local,
    /// Company and other mascots (企業・その他)
    Company,
}

impl Kind {
    /// All kinds in display order.
    pub const ALL: [Kind; 2] = [Kind::Local, Kind::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Local => "local",
            Kind::Company => "company",
        }
    }

    /// Human-readable tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Local => "ご当地",
            Kind::Company => "企業・その他",
        }
    }

    /// Path prefix the kind's ranking pages live under.
    pub fn prefix(&self) -> &'static str {
        match self {
            Kind::Local => "/",
            Kind::Company => "/company/",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Kind::Local),
            "company" | "company-or-other" | "other" => Ok(Kind::Company),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}
