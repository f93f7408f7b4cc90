use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::stats::{
    DeckColorRecord, DeckRecord, GameResultRecord, GameSessionRecord, PlayerRecord,
    StatsSnapshot, StatsStorage, StatsStorageError,
};

/// Initialize a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new().connect(database_url).await?;

    tracing::info!("Database connection pool established");

    Ok(pool)
}

/// PostgreSQL implementation of [`StatsStorage`].
///
/// Reads the `player`, `deck`, `deck_color`, `color_identity`,
/// `game_session` and `game_result` tables.
#[derive(Clone)]
pub struct PgStatsStorage {
    pub pool: PgPool,
}

impl PgStatsStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn players(&self) -> Result<Vec<PlayerRecord>, StatsStorageError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id::BIGINT, player_name FROM player ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, player_name)| PlayerRecord { id, player_name })
            .collect())
    }

    async fn decks(&self) -> Result<Vec<DeckRecord>, StatsStorageError> {
        let rows: Vec<(i64, String, String, Option<String>, Option<i64>)> = sqlx::query_as(
            r#"
            SELECT d.id::BIGINT, d.deck_name, d.color_identity_code, ci.identity_name,
                   d.owner_id::BIGINT
            FROM deck d
            LEFT JOIN color_identity ci ON ci.code = d.color_identity_code
            ORDER BY d.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, deck_name, color_identity_code, color_identity_name, owner_id)| DeckRecord {
                    id,
                    deck_name,
                    color_identity_code,
                    color_identity_name,
                    owner_id,
                },
            )
            .collect())
    }

    async fn sessions(&self) -> Result<Vec<GameSessionRecord>, StatsStorageError> {
        let rows: Vec<(i64, chrono::NaiveDate, Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT id::BIGINT, game_date, gs_wincon, comments FROM game_session ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, game_date, wincon, comments)| GameSessionRecord {
                id,
                game_date,
                wincon,
                comments,
            })
            .collect())
    }

    async fn deck_colors(&self) -> Result<Vec<DeckColorRecord>, StatsStorageError> {
        let rows: Vec<(i64, i64, String, String)> = sqlx::query_as(
            r#"
            SELECT dc.id::BIGINT, dc.deck_id::BIGINT, dc.color_id, ci.identity_name
            FROM deck_color dc
            JOIN color_identity ci ON ci.code = dc.color_id
            ORDER BY dc.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, deck_id, color_code, color_name)| DeckColorRecord {
                id,
                deck_id,
                color_code,
                color_name,
            })
            .collect())
    }

    async fn results(&self) -> Result<Vec<GameResultRecord>, StatsStorageError> {
        let rows: Vec<(i64, i64, i64, i64, i32, Option<i64>)> = sqlx::query_as(
            r#"
            SELECT id::BIGINT, gr_session_id::BIGINT, player_id::BIGINT, deck_id::BIGINT,
                   finish::INTEGER, eliminated_by_id::BIGINT
            FROM game_result
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, session_id, player_id, deck_id, finish, eliminated_by_id)| {
                    GameResultRecord {
                        id,
                        session_id,
                        player_id,
                        deck_id,
                        finish,
                        eliminated_by_id,
                    }
                },
            )
            .collect())
    }
}

impl StatsStorage for PgStatsStorage {
    type Error = StatsStorageError;

    async fn is_connected(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn snapshot(&self) -> Result<StatsSnapshot, Self::Error> {
        let (players, decks, sessions, results, deck_colors) = tokio::try_join!(
            self.players(),
            self.decks(),
            self.sessions(),
            self.results(),
            self.deck_colors()
        )?;

        Ok(StatsSnapshot {
            players,
            decks,
            sessions,
            results,
            deck_colors,
        })
    }
}
