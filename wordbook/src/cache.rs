use chrono::Utc;
use dictionary::WordDefinition;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, query, Pool, Row, Sqlite, SqlitePool};
use tracing::warn;

const DB_URL: &str = "sqlite://wordbook.db";

// One row per distinct word. Words are stored lowercased so lookups are
// case-insensitive; the definition itself is a JSON blob so the schema does
// not have to follow the shape of the API response.
const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS cached_definitions(
        word TEXT NOT NULL,
        json TEXT NOT NULL,
        cached_at DATETIME NOT NULL
    )";
const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_cached_definitions_word ON cached_definitions(word)";

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to serialize definition: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct Cache {
    pool: Pool<Sqlite>,
}

impl Cache {
    /// Opens (creating if necessary) the on-disk cache next to the binary.
    pub async fn initialize() -> Result<Self, CacheError> {
        if !Sqlite::database_exists(DB_URL).await.unwrap_or(false) {
            Sqlite::create_database(DB_URL).await?;
        }
        let pool = SqlitePool::connect(DB_URL).await?;
        Self::with_pool(pool).await
    }

    /// An in-memory cache that vanishes on drop. A single connection keeps
    /// every handle on the same database.
    pub async fn in_memory() -> Result<Self, CacheError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: Pool<Sqlite>) -> Result<Self, CacheError> {
        query(CREATE_TABLE).execute(&pool).await?;
        query(CREATE_INDEX).execute(&pool).await?;
        Ok(Self { pool })
    }
}

impl Cache {
    /// Returns the most recently cached definition for a word, or `None`.
    /// A row whose payload no longer parses is treated as absent.
    pub async fn get(&self, word: &str) -> Result<Option<WordDefinition>, CacheError> {
        let word = word.to_lowercase();
        let row = query(
            "SELECT json FROM cached_definitions WHERE word = ?
             ORDER BY cached_at DESC, rowid DESC LIMIT 1",
        )
        .bind(&word)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let json: String = row.try_get("json")?;
        match serde_json::from_str(&json) {
            Ok(definition) => Ok(Some(definition)),
            Err(error) => {
                warn!(%word, %error, "discarding unreadable cache entry");
                Ok(None)
            }
        }
    }

    /// Upserts a definition under its lowercased word. Runs in a single
    /// transaction that also collapses any duplicate rows left behind by
    /// earlier versions of the schema: delete everything for the word, then
    /// insert one fresh row.
    pub async fn put(&self, definition: &WordDefinition) -> Result<(), CacheError> {
        let word = definition.word.to_lowercase();
        let json = serde_json::to_string(definition)?;
        let cached_at = Utc::now();

        let mut tx = self.pool.begin().await?;
        query("DELETE FROM cached_definitions WHERE word = ?")
            .bind(&word)
            .execute(&mut *tx)
            .await?;
        query("INSERT INTO cached_definitions(word, json, cached_at) VALUES(?, ?, ?)")
            .bind(&word)
            .bind(&json)
            .bind(cached_at)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Every cached definition, most recently written first. Rows that fail
    /// to parse are skipped so one corrupt entry cannot hide the rest of the
    /// history.
    pub async fn list_all(&self) -> Result<Vec<WordDefinition>, CacheError> {
        let rows = query(
            "SELECT word, json FROM cached_definitions ORDER BY cached_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut definitions = Vec::with_capacity(rows.len());
        for row in rows {
            let json: String = row.try_get("json")?;
            match serde_json::from_str(&json) {
                Ok(definition) => definitions.push(definition),
                Err(error) => {
                    let word: String = row.try_get("word")?;
                    warn!(%word, %error, "skipping unreadable cache entry");
                }
            }
        }
        Ok(definitions)
    }
}
