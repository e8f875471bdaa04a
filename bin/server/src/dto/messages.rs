use board_core::{
    pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
    Message, MessageEdit, NewMessage, Page, PageRequest,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to post a message
///
/// Any `id` sent by the client is ignored; the server assigns one.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "autor não pode estar vazio"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "conteúdo não pode estar vazio"))]
    pub content: String,
}

impl From<CreateMessageRequest> for NewMessage {
    fn from(request: CreateMessageRequest) -> Self {
        NewMessage {
            author: request.author,
            content: request.content,
        }
    }
}

/// Request to edit a message
///
/// Only `content` is applied. Other message fields may be present in the
/// body and are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, message = "conteúdo não pode estar vazio"))]
    pub content: String,
}

impl From<UpdateMessageRequest> for MessageEdit {
    fn from(request: UpdateMessageRequest) -> Self {
        MessageEdit {
            id: request.id,
            content: request.content,
        }
    }
}

/// Query parameters for listing messages
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// A message as sent to clients
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub like_count: u32,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            author: message.author,
            content: message.content,
            created_at: message.created_at,
            edited_at: message.edited_at,
            like_count: message.like_count,
        }
    }
}

/// One page of messages plus paging metadata
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<MessageResponse>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: usize,
    pub empty: bool,
}

impl From<Page<Message>> for PageResponse {
    fn from(page: Page<Message>) -> Self {
        let page = page.map(MessageResponse::from);
        Self {
            content: page.content,
            number: page.number,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            first: page.first,
            last: page.last,
            number_of_elements: page.number_of_elements,
            empty: page.empty,
        }
    }
}
