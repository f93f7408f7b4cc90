//! In-memory stats storage for local runs and tests.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use super::dashboard::mana_color_name;
use super::snapshot::StatsSnapshot;
use super::traits::StatsStorage;
use super::types::{
    DeckColorRecord, DeckRecord, GameResultRecord, GameSessionRecord, PlayerRecord, StatsStorageError,
};

/// One seat in a recorded game: `(player_id, deck_id, finish, eliminated_by_id)`.
pub type Seat = (i64, i64, i32, Option<i64>);

/// In-memory implementation of [`StatsStorage`].
#[derive(Clone)]
pub struct MemoryStatsStorage {
    data: Arc<RwLock<StatsSnapshot>>,
    connected: Arc<std::sync::atomic::AtomicBool>,
}

impl MemoryStatsStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::default(),
            connected: Arc::new(std::sync::atomic::AtomicBool::new(true)),
        }
    }

    pub fn from_snapshot(snapshot: StatsSnapshot) -> Self {
        let storage = Self::new();
        *storage.data.write().expect("lock poisoned") = snapshot;
        storage
    }

    /// Simulates losing (or regaining) the backing store.
    pub fn set_connected(&self, connected: bool) {
        self.connected
            .store(connected, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn add_player(&self, name: impl Into<String>) -> Result<PlayerRecord, StatsStorageError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StatsStorageError::InvalidInput(
                "player name must not be empty".to_string(),
            ));
        }

        let mut data = self.data.write().expect("lock poisoned");
        if data.players.iter().any(|p| p.player_name == name) {
            return Err(StatsStorageError::InvalidInput(format!(
                "player name already taken: {name}"
            )));
        }

        let record = PlayerRecord {
            id: data.players.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            player_name: name,
        };
        data.players.push(record.clone());
        Ok(record)
    }

    pub fn add_deck(
        &self,
        name: impl Into<String>,
        color_identity_code: impl Into<String>,
        color_identity_name: Option<&str>,
        owner_id: Option<i64>,
    ) -> Result<DeckRecord, StatsStorageError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StatsStorageError::InvalidInput(
                "deck name must not be empty".to_string(),
            ));
        }

        let mut data = self.data.write().expect("lock poisoned");
        if data.decks.iter().any(|d| d.deck_name == name) {
            return Err(StatsStorageError::InvalidInput(format!(
                "deck name already taken: {name}"
            )));
        }
        if let Some(owner_id) = owner_id
            && !data.players.iter().any(|p| p.id == owner_id)
        {
            return Err(StatsStorageError::PlayerNotFound(owner_id));
        }

        let record = DeckRecord {
            id: data.decks.iter().map(|d| d.id).max().unwrap_or(0) + 1,
            deck_name: name,
            color_identity_code: color_identity_code.into(),
            color_identity_name: color_identity_name.map(str::to_string),
            owner_id,
        };
        data.decks.push(record.clone());
        Ok(record)
    }

    /// Tags a deck with one single mana color for the dashboard color chart.
    pub fn add_deck_color(
        &self,
        deck_id: i64,
        color_code: &str,
    ) -> Result<DeckColorRecord, StatsStorageError> {
        let color_name = mana_color_name(color_code).ok_or_else(|| {
            StatsStorageError::InvalidInput(format!("not a single mana color: {color_code}"))
        })?;

        let mut data = self.data.write().expect("lock poisoned");
        if !data.decks.iter().any(|d| d.id == deck_id) {
            return Err(StatsStorageError::DeckNotFound(deck_id));
        }
        if data
            .deck_colors
            .iter()
            .any(|c| c.deck_id == deck_id && c.color_code == color_code)
        {
            return Err(StatsStorageError::InvalidInput(format!(
                "deck {deck_id} already has color {color_code}"
            )));
        }

        let record = DeckColorRecord {
            id: data.deck_colors.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            deck_id,
            color_code: color_code.to_string(),
            color_name: color_name.to_string(),
        };
        data.deck_colors.push(record.clone());
        Ok(record)
    }

    /// Records a game session with one result per seat.
    pub fn record_game(
        &self,
        game_date: NaiveDate,
        wincon: Option<&str>,
        seats: &[Seat],
    ) -> Result<GameSessionRecord, StatsStorageError> {
        if seats.is_empty() {
            return Err(StatsStorageError::InvalidInput(
                "a game needs at least one seat".to_string(),
            ));
        }
        let mut seated = HashSet::new();
        if let Some(&(player_id, ..)) = seats.iter().find(|seat| !seated.insert(seat.0)) {
            return Err(StatsStorageError::InvalidInput(format!(
                "player {player_id} is seated more than once"
            )));
        }

        let mut data = self.data.write().expect("lock poisoned");

        for &(player_id, deck_id, _, eliminated_by) in seats {
            for id in std::iter::once(player_id).chain(eliminated_by) {
                if !data.players.iter().any(|p| p.id == id) {
                    return Err(StatsStorageError::PlayerNotFound(id));
                }
            }
            if !data.decks.iter().any(|d| d.id == deck_id) {
                return Err(StatsStorageError::DeckNotFound(deck_id));
            }
        }

        let session = GameSessionRecord {
            id: data.sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            game_date,
            wincon: wincon.map(str::to_string),
            comments: None,
        };
        data.sessions.push(session.clone());

        let mut next_id = data.results.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        for &(player_id, deck_id, finish, eliminated_by_id) in seats {
            data.results.push(GameResultRecord {
                id: next_id,
                session_id: session.id,
                player_id,
                deck_id,
                finish,
                eliminated_by_id,
            });
            next_id += 1;
        }

        Ok(session)
    }
}

impl Default for MemoryStatsStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsStorage for MemoryStatsStorage {
    type Error = StatsStorageError;

    async fn is_connected(&self) -> bool {
        self.connected.load(std::sync::atomic::Ordering::SeqCst)
    }

    async fn snapshot(&self) -> Result<StatsSnapshot, Self::Error> {
        if !self.is_connected().await {
            return Err(StatsStorageError::DatabaseError(
                "in-memory store is disconnected".to_string(),
            ));
        }
        Ok(self.data.read().expect("lock poisoned").clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    #[tokio::test]
    async fn records_players_decks_and_games() {
        let storage = MemoryStatsStorage::new();
        let alice = storage.add_player("Alice").unwrap();
        let bob = storage.add_player("Bob").unwrap();
        let deck = storage
            .add_deck("Atraxa", "WUBG", Some("Witch-Maw"), Some(alice.id))
            .unwrap();
        let other = storage.add_deck("Krenko", "R", None, Some(bob.id)).unwrap();

        let session = storage
            .record_game(
                date(),
                Some("poison"),
                &[(alice.id, deck.id, 1, None), (bob.id, other.id, 2, Some(alice.id))],
            )
            .unwrap();

        let snapshot = storage.snapshot().await.unwrap();
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.decks.len(), 2);
        assert_eq!(snapshot.sessions, vec![session]);
        assert_eq!(snapshot.results.len(), 2);
        assert_eq!(snapshot.results[1].eliminated_by_id, Some(alice.id));
    }

    #[test]
    fn rejects_unknown_references() {
        let storage = MemoryStatsStorage::new();
        assert!(matches!(
            storage.add_deck("Ghost", "B", None, Some(42)),
            Err(StatsStorageError::PlayerNotFound(42))
        ));

        let alice = storage.add_player("Alice").unwrap();
        assert!(matches!(
            storage.record_game(date(), None, &[(alice.id, 7, 1, None)]),
            Err(StatsStorageError::DeckNotFound(7))
        ));
    }

    #[test]
    fn rejects_duplicate_or_blank_player_names() {
        let storage = MemoryStatsStorage::new();
        storage.add_player("Alice").unwrap();
        assert!(storage.add_player("Alice").is_err());
        assert!(storage.add_player("   ").is_err());
    }

    #[test]
    fn rejects_duplicate_or_blank_deck_names() {
        let storage = MemoryStatsStorage::new();
        storage.add_deck("Krenko", "R", None, None).unwrap();
        assert!(matches!(
            storage.add_deck("Krenko", "R", None, None),
            Err(StatsStorageError::InvalidInput(_))
        ));
        assert!(matches!(
            storage.add_deck("  ", "G", None, None),
            Err(StatsStorageError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn rejects_empty_games_and_double_seats() {
        let storage = MemoryStatsStorage::new();
        let alice = storage.add_player("Alice").unwrap();
        let deck = storage.add_deck("Krenko", "R", None, None).unwrap();
        let other = storage.add_deck("Edgar", "WBR", None, None).unwrap();

        assert!(matches!(
            storage.record_game(date(), None, &[]),
            Err(StatsStorageError::InvalidInput(_))
        ));
        assert!(matches!(
            storage.record_game(
                date(),
                None,
                &[(alice.id, deck.id, 1, None), (alice.id, other.id, 2, None)],
            ),
            Err(StatsStorageError::InvalidInput(_))
        ));

        let snapshot = storage.snapshot().await.unwrap();
        assert!(snapshot.sessions.is_empty());
        assert!(snapshot.results.is_empty());
    }

    #[tokio::test]
    async fn deck_colors_are_single_mana_colors() {
        let storage = MemoryStatsStorage::new();
        let deck = storage.add_deck("Edgar", "WBR", Some("Mardu"), None).unwrap();

        let white = storage.add_deck_color(deck.id, "W").unwrap();
        assert_eq!(white.color_name, "White");
        assert!(storage.add_deck_color(deck.id, "W").is_err());
        assert!(storage.add_deck_color(deck.id, "WB").is_err());
        assert!(matches!(
            storage.add_deck_color(42, "B"),
            Err(StatsStorageError::DeckNotFound(42))
        ));

        let snapshot = storage.snapshot().await.unwrap();
        assert_eq!(snapshot.deck_colors, vec![white]);
    }

    #[tokio::test]
    async fn disconnected_store_fails_snapshot() {
        let storage = MemoryStatsStorage::new();
        storage.set_connected(false);
        assert!(!storage.is_connected().await);
        assert!(storage.snapshot().await.is_err());
    }
}
