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

//! # Board Core
//!
//! Storage and business rules for a small message board.
//!
//! This crate provides the message model, page requests and results, a
//! repository abstraction with SQLite and in-process backends, and the
//! service that enforces the rules around creating and editing messages.

pub mod database;
pub mod errors;
pub mod messages;
pub mod pagination;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use errors::{BoardError, BoardResult};
pub use messages::{Message, MessageEdit, NewMessage};
pub use pagination::{Page, PageRequest};
pub use service::MessageService;

// Re-export traits
pub use database::MessageRepository;
