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

//! In-process message store

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::MessageRepository;
use super::types::{DatabaseError, DatabaseResult};
use crate::messages::Message;
use crate::pagination::{Page, PageRequest};

#[derive(Debug, Default)]
struct Store {
    next_seq: u64,
    /// Messages keyed by insertion sequence
    rows: BTreeMap<u64, Message>,
    index: HashMap<Uuid, u64>,
}

/// Message repository that keeps everything in process memory
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    store: RwLock<Store>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: &Message) -> DatabaseResult<()> {
        let mut store = self.store.write().await;
        if store.index.contains_key(&message.id) {
            return Err(DatabaseError::Query(format!(
                "message {} already exists",
                message.id
            )));
        }

        let seq = store.next_seq;
        store.next_seq += 1;
        store.index.insert(message.id, seq);
        store.rows.insert(seq, message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Message>> {
        let store = self.store.read().await;
        Ok(store
            .index
            .get(&id)
            .and_then(|seq| store.rows.get(seq))
            .cloned())
    }

    async fn update(&self, message: &Message) -> DatabaseResult<()> {
        let mut store = self.store.write().await;
        let seq = *store
            .index
            .get(&message.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("message {}", message.id)))?;
        store.rows.insert(seq, message.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut store = self.store.write().await;
        match store.index.remove(&id) {
            Some(seq) => {
                store.rows.remove(&seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_page(&self, request: PageRequest) -> DatabaseResult<Page<Message>> {
        let store = self.store.read().await;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = store
            .rows
            .values()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, request, store.rows.len() as u64))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        Ok(self.store.read().await.rows.len() as u64)
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        Ok(true)
    }

    async fn close(&self) -> DatabaseResult<()> {
        Ok(())
    }
}
