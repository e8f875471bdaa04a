/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! SQLite database implementation

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::DatabaseConfig;
use super::traits::MessageRepository;
use super::types::{DatabaseError, DatabaseResult};
use crate::messages::Message;
use crate::pagination::{Page, PageRequest};
use crate::utils::datetime_utils::{format_for_db, parse_from_db};

const DEFAULT_POOL_SIZE: u32 = 5;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const CREATE_MESSAGES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS messages (
        id          TEXT PRIMARY KEY NOT NULL,
        author      TEXT NOT NULL,
        content     TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        edited_at   TEXT,
        like_count  INTEGER NOT NULL DEFAULT 0 CHECK (like_count >= 0)
    )";

const SELECT_COLUMNS: &str = "SELECT id, author, content, created_at, edited_at, like_count FROM messages";

/// Row shape of the `messages` table
#[derive(Debug, FromRow)]
struct MessageRow {
    id: String,
    author: String,
    content: String,
    created_at: String,
    edited_at: Option<String>,
    like_count: i64,
}

impl TryFrom<MessageRow> for Message {
    type Error = DatabaseError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let like_count = u32::try_from(row.like_count).map_err(|_| {
            DatabaseError::Parse(format!("like_count out of range: {}", row.like_count))
        })?;

        Ok(Message {
            id: Uuid::parse_str(&row.id)?,
            author: row.author,
            content: row.content,
            created_at: parse_from_db(&row.created_at)?,
            edited_at: row.edited_at.as_deref().map(parse_from_db).transpose()?,
            like_count,
        })
    }
}

/// Message repository backed by a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Open a pool against the configured database, creating the file if needed
    pub async fn new(config: DatabaseConfig) -> DatabaseResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.uri)
            .map_err(|e| DatabaseError::Connection(format!("invalid uri {}: {}", config.uri, e)))?
            .create_if_missing(true);

        let timeout = Duration::from_secs(config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS));
        let pool_options = SqlitePoolOptions::new().acquire_timeout(timeout);

        // Every connection to `:memory:` is a separate database, so keep exactly one alive
        let pool_options = if config.is_in_memory_sqlite() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        info!(uri = %config.uri, "Connected to SQLite");
        Ok(Self { pool })
    }

    /// Create the `messages` table if it does not exist yet
    pub async fn initialize_schema(&self) -> DatabaseResult<()> {
        sqlx::query(CREATE_MESSAGES_TABLE).execute(&self.pool).await?;
        debug!("messages table ready");
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, message: &Message) -> DatabaseResult<()> {
        sqlx::query(
            "INSERT INTO messages (id, author, content, created_at, edited_at, like_count)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(&message.author)
        .bind(&message.content)
        .bind(format_for_db(message.created_at))
        .bind(message.edited_at.map(format_for_db))
        .bind(i64::from(message.like_count))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Message>> {
        let row = sqlx::query_as::<_, MessageRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Message::try_from).transpose()
    }

    async fn update(&self, message: &Message) -> DatabaseResult<()> {
        let result = sqlx::query(
            "UPDATE messages
             SET author = ?, content = ?, created_at = ?, edited_at = ?, like_count = ?
             WHERE id = ?",
        )
        .bind(&message.author)
        .bind(&message.content)
        .bind(format_for_db(message.created_at))
        .bind(message.edited_at.map(format_for_db))
        .bind(i64::from(message.like_count))
        .bind(message.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("message {}", message.id)));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_page(&self, request: PageRequest) -> DatabaseResult<Page<Message>> {
        let limit = i64::from(request.size);
        let offset = i64::try_from(request.offset())
            .map_err(|_| DatabaseError::Query(format!("offset too large: {}", request.offset())))?;

        // Rows and total come from the same snapshot
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "{} ORDER BY rowid LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        let content = rows
            .into_iter()
            .map(Message::try_from)
            .collect::<DatabaseResult<Vec<_>>>()?;
        let total = u64::try_from(total)
            .map_err(|_| DatabaseError::Internal(format!("negative count: {}", total)))?;

        Ok(Page::new(content, request, total))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|_| DatabaseError::Internal(format!("negative count: {}", count)))
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        let health: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(health == 1)
    }

    async fn close(&self) -> DatabaseResult<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_repository() -> SqliteMessageRepository {
        let repo = SqliteMessageRepository::new(DatabaseConfig::sqlite("sqlite::memory:".to_string()))
            .await
            .unwrap();
        repo.initialize_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = memory_repository().await;
        let message = Message::new("Jose".to_string(), "conteudo da mensagem".to_string());

        repo.insert(&message).await.unwrap();
        let found = repo.find_by_id(message.id).await.unwrap();

        assert_eq!(found, Some(message));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = memory_repository().await;
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let repo = memory_repository().await;
        let message = Message::new("Jose".to_string(), "primeira".to_string());

        repo.insert(&message).await.unwrap();
        let result = repo.insert(&message).await;

        assert!(matches!(result, Err(DatabaseError::Sqlx(_))));
    }

    #[tokio::test]
    async fn test_update_overwrites_row() {
        let repo = memory_repository().await;
        let mut message = Message::new("joe".to_string(), "xpto test".to_string());
        repo.insert(&message).await.unwrap();

        message.apply_edit("abcd".to_string());
        repo.update(&message).await.unwrap();

        let found = repo.find_by_id(message.id).await.unwrap().unwrap();
        assert_eq!(found.content, "abcd");
        assert_eq!(found.edited_at, message.edited_at);
    }

    #[tokio::test]
    async fn test_update_missing_row_fails() {
        let repo = memory_repository().await;
        let message = Message::new("joe".to_string(), "xpto".to_string());

        let result = repo.update(&message).await;

        assert!(matches!(result, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = memory_repository().await;
        let message = Message::new("joe".to_string(), "xpto".to_string());
        repo.insert(&message).await.unwrap();

        assert!(repo.delete_by_id(message.id).await.unwrap());
        assert!(!repo.delete_by_id(message.id).await.unwrap());
        assert!(repo.find_by_id(message.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_page_keeps_insertion_order() {
        let repo = memory_repository().await;
        let mut ids = Vec::new();
        for i in 0..5 {
            let message = Message::new("joe".to_string(), format!("mensagem {}", i));
            ids.push(message.id);
            repo.insert(&message).await.unwrap();
        }

        let first = repo.find_page(PageRequest::new(0, 2)).await.unwrap();
        let last = repo.find_page(PageRequest::new(2, 2)).await.unwrap();

        assert_eq!(first.content.iter().map(|m| m.id).collect::<Vec<_>>(), ids[0..2].to_vec());
        assert_eq!(first.total_elements, 5);
        assert_eq!(first.total_pages, 3);
        assert!(first.first);
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].id, ids[4]);
        assert!(last.last);
    }

    #[tokio::test]
    async fn test_find_page_releases_connection() {
        // The in-memory pool has a single connection; a dangling transaction would starve it
        let repo = memory_repository().await;
        repo.insert(&Message::new("joe".to_string(), "um".to_string()))
            .await
            .unwrap();

        let before = repo.find_page(PageRequest::new(0, 5000)).await.unwrap();
        repo.insert(&Message::new("joe".to_string(), "dois".to_string()))
            .await
            .unwrap();
        let after = repo.find_page(PageRequest::new(0, 5000)).await.unwrap();

        assert_eq!(before.total_elements, 1);
        assert_eq!(before.content.len(), 1);
        assert_eq!(after.total_elements, 2);
        assert_eq!(after.content.len(), 2);
        assert_eq!(after.total_elements, repo.count().await.unwrap());
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let uri = format!("sqlite://{}", dir.path().join("board.db").display());
        let message = Message::new("joe".to_string(), "persistida".to_string());

        let repo = SqliteMessageRepository::new(DatabaseConfig::sqlite(uri.clone()))
            .await
            .unwrap();
        repo.initialize_schema().await.unwrap();
        repo.insert(&message).await.unwrap();
        repo.close().await.unwrap();

        let reopened = SqliteMessageRepository::new(DatabaseConfig::sqlite(uri)).await.unwrap();
        reopened.initialize_schema().await.unwrap();

        assert_eq!(reopened.find_by_id(message.id).await.unwrap(), Some(message));
        assert_eq!(reopened.count().await.unwrap(), 1);
    }
}
