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

//! Database configuration types

use serde::{Deserialize, Serialize};

/// Supported database types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Sqlite,
    Memory,
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::Sqlite => write!(f, "sqlite"),
            DatabaseType::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseType::Sqlite),
            "memory" => Ok(DatabaseType::Memory),
            _ => Err(format!("Unknown database type: {}", s)),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub database_type: DatabaseType,
    pub uri: String,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl DatabaseConfig {
    /// Create a new SQLite configuration
    pub fn sqlite(uri: String) -> Self {
        Self {
            database_type: DatabaseType::Sqlite,
            uri,
            pool_size: None,
            timeout_seconds: None,
        }
    }

    /// Create an in-process configuration that keeps nothing on disk
    pub fn memory() -> Self {
        Self {
            database_type: DatabaseType::Memory,
            uri: String::new(),
            pool_size: None,
            timeout_seconds: None,
        }
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    /// Set the timeout in seconds
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Whether the URI points at a SQLite in-memory database
    pub fn is_in_memory_sqlite(&self) -> bool {
        self.uri.contains(":memory:") || self.uri.contains("mode=memory")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite("sqlite://board.db".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_type_round_trip_names() {
        assert_eq!("SQLite".parse::<DatabaseType>().unwrap(), DatabaseType::Sqlite);
        assert_eq!("memory".parse::<DatabaseType>().unwrap(), DatabaseType::Memory);
        assert!("neo4j".parse::<DatabaseType>().is_err());
        assert_eq!(DatabaseType::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_builders() {
        let config = DatabaseConfig::sqlite("sqlite::memory:".to_string())
            .with_pool_size(4)
            .with_timeout(5);
        assert_eq!(config.pool_size, Some(4));
        assert_eq!(config.timeout_seconds, Some(5));
        assert!(config.is_in_memory_sqlite());
        assert!(!DatabaseConfig::default().is_in_memory_sqlite());
    }
}
