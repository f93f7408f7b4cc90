//! Aggregates behind the dashboard charts and headline numbers.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use super::snapshot::{StatsSnapshot, ratio};
use super::types::{ColorCount, DashboardKpis};

/// Single mana colors in chart order, with their default display names.
pub const MANA_COLORS: [(&str, &str); 6] = [
    ("W", "White"),
    ("U", "Blue"),
    ("B", "Black"),
    ("R", "Red"),
    ("G", "Green"),
    ("C", "Colorless"),
];

/// Top deck name when no game has a winner yet.
const NO_TOP_DECK: &str = "None";

/// Display name of a single mana color code.
pub fn mana_color_name(code: &str) -> Option<&'static str> {
    MANA_COLORS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

fn mana_color_position(code: &str) -> usize {
    MANA_COLORS
        .iter()
        .position(|(c, _)| *c == code)
        .unwrap_or(MANA_COLORS.len())
}

fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl StatsSnapshot {
    pub fn kpis(&self) -> DashboardKpis {
        let total_games = count_u32(self.results.len());
        let player_count = count_u32(
            self.results
                .iter()
                .map(|r| r.player_id)
                .collect::<HashSet<_>>()
                .len(),
        );
        let first_places = count_u32(self.results.iter().filter(|r| r.finish == 1).count());

        let mut wins_by_deck: BTreeMap<i64, u32> = BTreeMap::new();
        for result in self.results.iter().filter(|r| r.finish == 1) {
            if self.deck_name(result.deck_id).is_some() {
                *wins_by_deck.entry(result.deck_id).or_insert(0) += 1;
            }
        }

        // Ties go to the lowest deck id
        let top_deck = wins_by_deck
            .into_iter()
            .max_by_key(|&(deck_id, wins)| (wins, Reverse(deck_id)));

        let (top_deck_wins, top_deck_name) = match top_deck {
            Some((deck_id, wins)) => (
                wins,
                self.deck_name(deck_id).unwrap_or(NO_TOP_DECK).to_string(),
            ),
            None => (0, NO_TOP_DECK.to_string()),
        };

        DashboardKpis {
            total_games,
            player_count,
            avg_winrate: ratio(first_places, total_games),
            top_deck_wins,
            top_deck_name,
            total_decks: count_u32(self.decks.len()),
        }
    }

    /// Decks per single mana color, most played first.
    pub fn color_counts(&self) -> Vec<ColorCount> {
        let deck_ids: HashSet<i64> = self.decks.iter().map(|d| d.id).collect();

        let mut counts: BTreeMap<(usize, &str, &str), u32> = BTreeMap::new();
        for color in &self.deck_colors {
            let position = mana_color_position(&color.color_code);
            if position == MANA_COLORS.len() || !deck_ids.contains(&color.deck_id) {
                continue;
            }
            *counts
                .entry((position, color.color_code.as_str(), color.color_name.as_str()))
                .or_insert(0) += 1;
        }

        let mut rows: Vec<ColorCount> = counts
            .into_iter()
            .map(|((_, code, name), count)| ColorCount {
                color: code.to_string(),
                name: name.to_string(),
                count,
            })
            .collect();
        rows.sort_by_key(|row| Reverse(row.count));
        rows
    }

    /// Decks per commander color identity, most common first.
    pub fn commander_identities(&self) -> Vec<ColorCount> {
        let mut counts: BTreeMap<&str, (&str, u32)> = BTreeMap::new();
        for deck in self.decks.iter().filter(|d| !d.color_identity_code.is_empty()) {
            let code = deck.color_identity_code.as_str();
            let name = deck.color_identity_name.as_deref().unwrap_or(code);
            counts.entry(code).or_insert((name, 0)).1 += 1;
        }

        let mut rows: Vec<ColorCount> = counts
            .into_iter()
            .map(|(code, (name, count))| ColorCount {
                color: code.to_string(),
                name: name.to_string(),
                count,
            })
            .collect();
        rows.sort_by_key(|row| Reverse(row.count));
        rows
    }
}
