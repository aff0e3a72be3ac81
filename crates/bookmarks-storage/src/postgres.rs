use async_trait::async_trait;
use bookmarks_core::error::{Result, StorageError};
use bookmarks_core::validate::MAX_RATING;
use bookmarks_core::{Bookmark, BookmarkId, BookmarkPatch, NewBookmark, Repository};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};
use tracing::debug;

static MIGRATOR: Migrator = sqlx::migrate!();

/// PostgreSQL implementation of the repository contract.
///
/// Ids are the table's identity column rendered as decimal strings. Any id
/// that is not the canonical form of an `i64` cannot exist in the table, so
/// lookups, updates and deletes for it short-circuit to "not found".
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository from an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new connection pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the bundled schema migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Operation(format!("migration failed: {e}")))
    }
}

fn parse_id(id: &BookmarkId) -> Option<i64> {
    id.as_str()
        .parse::<i64>()
        .ok()
        .filter(|value| value.to_string() == id.as_str())
}

fn decode_bookmark(row: &PgRow) -> Result<Bookmark> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let raw_rating: i16 = row.try_get("rating").map_err(map_sqlx_error)?;
    let rating = u8::try_from(raw_rating)
        .ok()
        .filter(|rating| *rating <= MAX_RATING)
        .ok_or_else(|| {
            StorageError::InvalidData(format!(
                "bookmark {id} has out-of-range rating {raw_rating}"
            ))
        })?;

    Ok(Bookmark {
        id: BookmarkId::new(id.to_string()),
        title: row.try_get("title").map_err(map_sqlx_error)?,
        url: row.try_get("url").map_err(map_sqlx_error)?,
        rating,
        description: row.try_get("description").map_err(map_sqlx_error)?,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn insert(&self, fields: NewBookmark) -> Result<Bookmark> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, url, description, rating
            "#,
        )
        .bind(fields.title)
        .bind(fields.url)
        .bind(fields.description)
        .bind(i16::from(fields.rating))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        decode_bookmark(&row)
    }

    async fn get_all(&self) -> Result<Vec<Bookmark>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(decode_bookmark).collect()
    }

    async fn get_by_id(&self, id: &BookmarkId) -> Result<Option<Bookmark>> {
        let Some(key) = parse_id(id) else {
            debug!(id = %id, "id is not a valid row key");
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(decode_bookmark).transpose()
    }

    async fn update(&self, id: &BookmarkId, patch: BookmarkPatch) -> Result<u64> {
        let Some(key) = parse_id(id) else {
            return Ok(0);
        };

        if patch.is_empty() {
            return Ok(self.get_by_id(id).await?.map_or(0, |_| 1));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE bookmarks SET ");
        let mut assignments = builder.separated(", ");
        if let Some(title) = patch.title {
            assignments.push("title = ").push_bind_unseparated(title);
        }
        if let Some(url) = patch.url {
            assignments.push("url = ").push_bind_unseparated(url);
        }
        if let Some(rating) = patch.rating {
            assignments
                .push("rating = ")
                .push_bind_unseparated(i16::from(rating));
        }
        if let Some(description) = patch.description {
            assignments
                .push("description = ")
                .push_bind_unseparated(description);
        }
        builder.push(" WHERE id = ").push_bind(key);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &BookmarkId) -> Result<u64> {
        let Some(key) = parse_id(id) else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
