//! Stat records as stored and rows as served.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: i64,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRecord {
    pub id: i64,
    pub deck_name: String,
    pub color_identity_code: String,
    /// Display name joined from the color identity table, when known.
    pub color_identity_name: Option<String>,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSessionRecord {
    pub id: i64,
    pub game_date: NaiveDate,
    pub wincon: Option<String>,
    pub comments: Option<String>,
}

/// A single mana color a deck plays, joined with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckColorRecord {
    pub id: i64,
    pub deck_id: i64,
    pub color_code: String,
    pub color_name: String,
}

/// One player's placement in one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResultRecord {
    pub id: i64,
    pub session_id: i64,
    pub player_id: i64,
    pub deck_id: i64,
    /// Finishing place, `1` is the winner.
    pub finish: i32,
    pub eliminated_by_id: Option<i64>,
}

/// Row served by `/api/players`. `win_rate` is a raw fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: i64,
    pub player_name: String,
    pub wins: u32,
    pub total_games: u32,
    pub win_rate: f64,
}

/// Row served by `/api/decks`. `win_rate` is a raw fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckRow {
    pub id: i64,
    pub deck_name: String,
    pub color_identity: String,
    pub deck_owner: String,
    pub win_rate: f64,
    pub edit_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResultRow {
    pub finish: i32,
    pub player: String,
    pub deck: String,
    pub eliminated_by: String,
}

/// Row served by `/api/game_sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSessionRow {
    pub session_id: i64,
    pub date: String,
    pub wincon: String,
    pub results: Vec<SessionResultRow>,
}

/// Headline numbers served by `/api/dashboard/kpis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    /// Recorded results, one per seat per game.
    pub total_games: u32,
    /// Distinct players with at least one result.
    pub player_count: u32,
    /// Share of all results that finished first.
    pub avg_winrate: f64,
    pub top_deck_wins: u32,
    /// `"None"` when nothing has been won yet.
    pub top_deck_name: String,
    pub total_decks: u32,
}

/// One bar of a dashboard color chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCount {
    pub color: String,
    pub name: String,
    pub count: u32,
}

/// Error type for stats storage operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StatsStorageError {
    #[error("Player not found: {0}")]
    PlayerNotFound(i64),

    #[error("Deck not found: {0}")]
    DeckNotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for StatsStorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
