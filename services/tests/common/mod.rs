//! Shared test utilities for integration tests.
//!
//! Provides a seeded `MemoryStatsStorage` and helpers for building the app
//! and minting viewer session tokens.

use axum::Router;
use chrono::NaiveDate;
use mtgstats_grid::LayoutVariant;
use mtgstats_services::{
    config::Config, routes, stats::MemoryStatsStorage, viewer::generate_session_token,
};

/// JWT secret used by `Config::new_for_test`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-key-for-local-development";

/// A storage holding four players, four decks with their single colors and
/// one four-player game that the first deck won.
pub fn seeded_storage() -> MemoryStatsStorage {
    let storage = MemoryStatsStorage::new();

    let alice = storage.add_player("Alice").expect("seed player");
    let bob = storage.add_player("Bob").expect("seed player");
    let carol = storage.add_player("Carol").expect("seed player");
    let dave = storage.add_player("Dave").expect("seed player");

    let krenko = storage
        .add_deck("Krenko", "R", Some("Mono-Red"), Some(alice.id))
        .expect("seed deck");
    let atraxa = storage
        .add_deck("Atraxa", "WUBG", None, Some(bob.id))
        .expect("seed deck");
    let edgar = storage
        .add_deck("Edgar", "WBR", Some("Mardu"), None)
        .expect("seed deck");
    let kinnan = storage
        .add_deck("Kinnan", "UG", Some("Simic"), Some(dave.id))
        .expect("seed deck");

    for (deck_id, colors) in [
        (krenko.id, "R"),
        (atraxa.id, "WUBG"),
        (edgar.id, "WBR"),
        (kinnan.id, "U"),
    ] {
        for code in colors.chars() {
            storage
                .add_deck_color(deck_id, &code.to_string())
                .expect("seed deck color");
        }
    }

    let date = NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date");
    storage
        .record_game(
            date,
            Some("Combat"),
            &[
                (alice.id, krenko.id, 1, None),
                (bob.id, atraxa.id, 2, Some(alice.id)),
                (carol.id, edgar.id, 3, Some(alice.id)),
                (dave.id, kinnan.id, 4, Some(bob.id)),
            ],
        )
        .expect("seed game");

    storage
}

/// Builds the app over seeded storage with the default layout.
#[allow(dead_code)]
pub fn create_test_app() -> Router {
    routes(seeded_storage(), Config::new_for_test())
}

/// Builds the app over seeded storage with a fixed layout.
#[allow(dead_code)]
pub fn create_test_app_with_layout(layout: LayoutVariant) -> Router {
    routes(seeded_storage(), Config::new_for_test_with_layout(layout))
}

/// `Authorization` header value for a logged-in viewer.
#[allow(dead_code)]
pub fn bearer(username: &str, is_admin: bool) -> String {
    let token =
        generate_session_token(username, is_admin, TEST_JWT_SECRET).expect("token should encode");
    format!("Bearer {token}")
}
