//! Aggregation of raw records into table rows.
//!
//! A game only counts towards a player's win rate when its session had at
//! least [`MIN_SESSION_SIZE`] players, and a player needs more than
//! [`MIN_VALID_GAMES`] such games before the rate is shown at all. Deck win
//! rates count every recorded game.

use std::collections::{BTreeMap, HashMap};

use mtgstats_grid::EntityKind;

use super::types::{
    DeckColorRecord, DeckRecord, DeckRow, GameResultRecord, GameSessionRecord, GameSessionRow, PlayerRecord,
    PlayerRow, SessionResultRow,
};

/// Smallest session whose games count as valid.
pub const MIN_SESSION_SIZE: usize = 4;
/// Players need strictly more valid games than this for a non-zero rate.
pub const MIN_VALID_GAMES: u32 = 10;

/// Deck rows show this when the deck has no owner.
const NO_OWNER: &str = "N/A";

/// Everything the stat tables are computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub players: Vec<PlayerRecord>,
    pub decks: Vec<DeckRecord>,
    pub sessions: Vec<GameSessionRecord>,
    pub results: Vec<GameResultRecord>,
    pub deck_colors: Vec<DeckColorRecord>,
}

pub(super) fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

impl StatsSnapshot {
    fn session_sizes(&self) -> HashMap<i64, usize> {
        let mut sizes = HashMap::new();
        for result in &self.results {
            *sizes.entry(result.session_id).or_insert(0) += 1;
        }
        sizes
    }

    pub(super) fn player_name(&self, id: i64) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.player_name.as_str())
    }

    pub(super) fn deck_name(&self, id: i64) -> Option<&str> {
        self.decks
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.deck_name.as_str())
    }

    /// Player table rows, ordered by player name.
    pub fn player_rows(&self) -> Vec<PlayerRow> {
        let sizes = self.session_sizes();

        let mut rows: Vec<PlayerRow> = self
            .players
            .iter()
            .map(|player| {
                let mut total_games = 0;
                let mut valid_games = 0;
                let mut wins = 0;

                for result in self.results.iter().filter(|r| r.player_id == player.id) {
                    total_games += 1;
                    let valid = sizes.get(&result.session_id).copied().unwrap_or(0)
                        >= MIN_SESSION_SIZE;
                    if valid {
                        valid_games += 1;
                        if result.finish == 1 {
                            wins += 1;
                        }
                    }
                }

                let win_rate = if valid_games > MIN_VALID_GAMES {
                    ratio(wins, valid_games)
                } else {
                    0.0
                };

                PlayerRow {
                    id: player.id,
                    player_name: player.player_name.clone(),
                    wins,
                    total_games,
                    win_rate,
                }
            })
            .collect();

        rows.sort_by(|a, b| a.player_name.cmp(&b.player_name));
        rows
    }

    /// Deck table rows, ordered by deck id.
    pub fn deck_rows(&self) -> Vec<DeckRow> {
        let mut rows: Vec<DeckRow> = self
            .decks
            .iter()
            .map(|deck| {
                let (wins, total) = self
                    .results
                    .iter()
                    .filter(|r| r.deck_id == deck.id)
                    .fold((0, 0), |(wins, total), r| {
                        (wins + u32::from(r.finish == 1), total + 1)
                    });

                let color_identity = deck
                    .color_identity_name
                    .clone()
                    .unwrap_or_else(|| deck.color_identity_code.clone());

                let deck_owner = deck
                    .owner_id
                    .and_then(|id| self.player_name(id))
                    .unwrap_or(NO_OWNER)
                    .to_string();

                DeckRow {
                    id: deck.id,
                    deck_name: deck.deck_name.clone(),
                    color_identity,
                    deck_owner,
                    win_rate: ratio(wins, total),
                    edit_url: EntityKind::Deck.edit_path(deck.id),
                }
            })
            .collect();

        rows.sort_by_key(|row| row.id);
        rows
    }

    /// Game log rows, newest session first, each ordered by finish.
    pub fn session_rows(&self) -> Vec<GameSessionRow> {
        let mut grouped: BTreeMap<i64, Vec<&GameResultRecord>> = BTreeMap::new();
        for result in &self.results {
            grouped.entry(result.session_id).or_default().push(result);
        }

        grouped
            .into_iter()
            .rev()
            .map(|(session_id, mut results)| {
                results.sort_by_key(|r| r.finish);
                let session = self.sessions.iter().find(|s| s.id == session_id);

                GameSessionRow {
                    session_id,
                    date: session
                        .map(|s| s.game_date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    wincon: session.and_then(|s| s.wincon.clone()).unwrap_or_default(),
                    results: results
                        .into_iter()
                        .map(|r| SessionResultRow {
                            finish: r.finish,
                            player: self.player_name(r.player_id).unwrap_or_default().to_string(),
                            deck: self.deck_name(r.deck_id).unwrap_or_default().to_string(),
                            eliminated_by: r
                                .eliminated_by_id
                                .and_then(|id| self.player_name(id))
                                .unwrap_or_default()
                                .to_string(),
                        })
                        .collect(),
                }
            })
            .collect()
    }
}
