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

//! Database abstraction layer for the message board
//!
//! This module provides a storage-agnostic interface for message persistence.
//! It supports a SQLite backend and an in-process backend.

use std::sync::Arc;

pub mod traits;
pub mod sqlite;
pub mod memory;
pub mod config;
pub mod types;

pub use traits::MessageRepository;
pub use config::{DatabaseConfig, DatabaseType};
pub use types::{DatabaseError, DatabaseResult};

/// Factory function to create a repository based on configuration
pub async fn create_repository(config: DatabaseConfig) -> DatabaseResult<Arc<dyn MessageRepository>> {
    match config.database_type {
        DatabaseType::Sqlite => {
            let db = sqlite::SqliteMessageRepository::new(config).await?;
            db.initialize_schema().await?;
            Ok(Arc::new(db))
        }
        DatabaseType::Memory => Ok(Arc::new(memory::InMemoryMessageRepository::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_repository() {
        let repo = create_repository(DatabaseConfig::memory()).await.unwrap();
        assert!(repo.health_check().await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_sqlite_repository_initializes_schema() {
        let repo = create_repository(DatabaseConfig::sqlite("sqlite::memory:".to_string()))
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
