//! Deck, player and game log statistics.
//!
//! Raw records (players, decks, game sessions and their results) come from a
//! [`StatsStorage`] implementation; [`StatsSnapshot`] turns them into the rows
//! the stat tables fetch from `/api/decks`, `/api/players` and
//! `/api/game_sessions`, plus the dashboard aggregates under
//! `/api/dashboard`.

mod dashboard;
mod memory;
mod snapshot;
mod traits;
mod types;

pub use dashboard::{MANA_COLORS, mana_color_name};
pub use memory::{MemoryStatsStorage, Seat};
pub use snapshot::{MIN_SESSION_SIZE, MIN_VALID_GAMES, StatsSnapshot};
pub use traits::StatsStorage;
pub use types::{
    ColorCount, DashboardKpis, DeckColorRecord, DeckRecord, DeckRow, GameResultRecord,
    GameSessionRecord, GameSessionRow, PlayerRecord, PlayerRow, SessionResultRow,
    StatsStorageError,
};
