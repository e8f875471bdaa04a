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

//! Database abstraction traits

use std::fmt::Debug;
use async_trait::async_trait;
use uuid::Uuid;

use super::types::DatabaseResult;
use crate::messages::Message;
use crate::pagination::{Page, PageRequest};

/// Storage operations for messages
#[async_trait]
pub trait MessageRepository: Send + Sync + Debug {
    /// Persist a new message
    async fn insert(&self, message: &Message) -> DatabaseResult<()>;

    /// Fetch a message by identifier
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Message>>;

    /// Overwrite a stored message; fails with `NotFound` if it is gone
    async fn update(&self, message: &Message) -> DatabaseResult<()>;

    /// Remove a message, returning whether anything was deleted
    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Fetch one page of messages in insertion order
    async fn find_page(&self, request: PageRequest) -> DatabaseResult<Page<Message>>;

    /// Count all stored messages
    async fn count(&self) -> DatabaseResult<u64>;

    /// Check if the store is reachable
    async fn health_check(&self) -> DatabaseResult<bool>;

    /// Release the underlying connections
    async fn close(&self) -> DatabaseResult<()>;
}
