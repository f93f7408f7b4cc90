//! The two stat tables.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Deck,
    Player,
}

impl EntityKind {
    pub const ALL: [Self; 2] = [Self::Deck, Self::Player];

    /// Path segment used in URLs (`deck`, `player`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deck => "deck",
            Self::Player => "player",
        }
    }

    /// Endpoint the grid widget fetches rows from.
    pub fn data_source_url(&self) -> &'static str {
        match self {
            Self::Deck => "/api/decks",
            Self::Player => "/api/players",
        }
    }

    /// DOM id of the table element this kind renders into.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Deck => "deckTable",
            Self::Player => "playerTable",
        }
    }

    /// Edit page for one row.
    pub fn edit_path(&self, id: impl Display) -> String {
        format!("/{}/edit/{id}", self.as_str())
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deck" | "decks" => Ok(Self::Deck),
            "player" | "players" => Ok(Self::Player),
            other => Err(GridError::UnknownEntityKind(other.to_string())),
        }
    }
}
