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

use thiserror::Error;
use uuid::Uuid;

use crate::database::DatabaseError;

/// Base error type for message board operations
///
/// The display text of [`BoardError::MessageNotFound`] and
/// [`BoardError::IdMismatch`] is what clients receive as the response body.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Mensagem não encontrada")]
    MessageNotFound { id: Uuid },

    #[error("mensagem não apresenta o ID correto")]
    IdMismatch {
        expected: Uuid,
        received: Option<Uuid>,
    },

    #[error("Invalid page request: {message}")]
    InvalidPageRequest { message: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Result type alias for message board operations
pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_messages() {
        let id = Uuid::new_v4();
        assert_eq!(
            BoardError::MessageNotFound { id }.to_string(),
            "Mensagem não encontrada"
        );
        assert_eq!(
            BoardError::IdMismatch {
                expected: id,
                received: None
            }
            .to_string(),
            "mensagem não apresenta o ID correto"
        );
    }
}
