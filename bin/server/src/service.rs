use anyhow::Result;
use board_core::{
    database::{create_repository, MessageRepository},
    MessageService,
};
use std::sync::Arc;
use tracing::warn;

use crate::config::Settings;

/// Service layer that owns the storage backend and hands out the message service
pub struct BoardService {
    messages: MessageService,
}

impl BoardService {
    /// Create a new BoardService from settings
    pub async fn new(settings: &Settings) -> Result<Self> {
        let repository = create_repository(settings.database_config())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

        Ok(Self::with_repository(repository))
    }

    /// Create a BoardService around an existing repository
    pub fn with_repository(repository: Arc<dyn MessageRepository>) -> Self {
        Self {
            messages: MessageService::new(repository),
        }
    }

    /// Message operations
    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    /// Whether the storage backend answers
    pub async fn is_healthy(&self) -> bool {
        match self.messages.repository().health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Release storage resources
    pub async fn shutdown(&self) -> Result<()> {
        self.messages
            .repository()
            .close()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to close database: {}", e))
    }
}
