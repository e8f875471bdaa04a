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

//! Business rules for messages
//!
//! The service assigns identifiers, stamps timestamps, guards updates against
//! mismatched identifiers and turns missing rows into [`BoardError::MessageNotFound`].
//! Input validation happens before a call reaches this layer.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    database::{DatabaseError, MessageRepository},
    errors::{BoardError, BoardResult},
    messages::{Message, MessageEdit, NewMessage},
    pagination::{Page, PageRequest},
};

/// Service layer that manages messages on top of a repository
#[derive(Debug, Clone)]
pub struct MessageService {
    repository: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// The repository this service writes to
    pub fn repository(&self) -> &Arc<dyn MessageRepository> {
        &self.repository
    }

    /// Store a new message under a freshly generated identifier
    #[instrument(skip(self, message), fields(author = %message.author))]
    pub async fn create(&self, message: NewMessage) -> BoardResult<Message> {
        let message = Message::new(message.author, message.content);
        self.repository.insert(&message).await?;

        debug!(id = %message.id, "message created");
        Ok(message)
    }

    /// Fetch a message by identifier
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> BoardResult<Message> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BoardError::MessageNotFound { id })
    }

    /// Replace the content of the message addressed by `id`
    ///
    /// The identifier carried by `edit` must name the same message.
    #[instrument(skip(self, edit))]
    pub async fn update(&self, id: Uuid, edit: MessageEdit) -> BoardResult<Message> {
        let mut message = self.get(id).await?;

        if edit.id != Some(message.id) {
            warn!(received = ?edit.id, "rejected update with mismatched id");
            return Err(BoardError::IdMismatch {
                expected: message.id,
                received: edit.id,
            });
        }

        message.apply_edit(edit.content);
        self.repository.update(&message).await.map_err(|e| match e {
            // Deleted between the read and the write
            DatabaseError::NotFound(_) => BoardError::MessageNotFound { id },
            other => other.into(),
        })?;

        debug!("message updated");
        Ok(message)
    }

    /// Hard-delete a message
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> BoardResult<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(BoardError::MessageNotFound { id });
        }

        debug!("message deleted");
        Ok(())
    }

    /// List one page of messages in insertion order
    #[instrument(skip(self))]
    pub async fn list(&self, request: PageRequest) -> BoardResult<Page<Message>> {
        request.validate()?;
        Ok(self.repository.find_page(request).await?)
    }
}
