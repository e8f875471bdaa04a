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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::datetime_utils::utc_now;

/// A message posted to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Server-generated identifier, immutable once assigned
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Time of the last accepted edit, `None` until the first one
    pub edited_at: Option<DateTime<Utc>>,
    /// Reserved counter; nothing increments it yet
    pub like_count: u32,
}

impl Message {
    /// Build a fresh message with a new identifier and creation time.
    pub fn new(author: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            content,
            created_at: utc_now(),
            edited_at: None,
            like_count: 0,
        }
    }

    /// Replace the content and stamp the edit time.
    ///
    /// The edit time never moves backwards relative to `created_at` or a
    /// previous edit, even if the wall clock does.
    pub fn apply_edit(&mut self, content: String) {
        let floor = self.edited_at.unwrap_or(self.created_at);
        let now = utc_now();
        self.content = content;
        self.edited_at = Some(if now < floor { floor } else { now });
    }
}

/// Input for creating a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub author: String,
    pub content: String,
}

/// Input for editing a message.
///
/// `id` is the identifier the client believes it is editing; it must match
/// the addressed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEdit {
    pub id: Option<Uuid>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_message_creation() {
        let message = Message::new("Jose".to_string(), "conteudo da mensagem".to_string());
        assert_eq!(message.author, "Jose");
        assert_eq!(message.content, "conteudo da mensagem");
        assert_eq!(message.like_count, 0);
        assert!(message.edited_at.is_none());
        assert!(!message.id.is_nil());
    }

    #[test]
    fn test_apply_edit_keeps_other_fields() {
        let mut message = Message::new("joe".to_string(), "xpto test".to_string());
        let original = message.clone();

        message.apply_edit("abcd".to_string());

        assert_eq!(message.content, "abcd");
        assert_eq!(message.id, original.id);
        assert_eq!(message.author, original.author);
        assert_eq!(message.created_at, original.created_at);
        assert!(message.edited_at.unwrap() >= original.created_at);
    }

    #[test]
    fn test_apply_edit_never_moves_backwards() {
        let mut message = Message::new("joe".to_string(), "xpto".to_string());
        let future = utc_now() + Duration::hours(1);
        message.edited_at = Some(future);

        message.apply_edit("later".to_string());

        assert_eq!(message.edited_at, Some(future));
    }

    #[test]
    fn test_serializes_camel_case() {
        let message = Message::new("joe".to_string(), "xpto".to_string());
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["author"], "joe");
        assert_eq!(json["likeCount"], 0);
        assert!(json["createdAt"].is_string());
        assert!(json["editedAt"].is_null());
    }
}
