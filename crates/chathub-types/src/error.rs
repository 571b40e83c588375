use thiserror::Error;

use crate::conversation::ConversationId;

/// Rejected user input. State is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("le nom de la conversation ne peut pas être vide")]
    EmptyName,

    #[error("un bot doit être sélectionné")]
    MissingBot,

    #[error("bot inconnu : {0}")]
    UnknownBot(String),

    #[error("le message ne peut pas être vide")]
    EmptyMessage,

    #[error("aucune conversation sélectionnée")]
    NoConversationSelected,
}

/// Failures of the storage backend. Never fatal: loads degrade to an empty
/// list and failed saves are logged.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Errors surfaced by conversation store and chat service operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("conversation {0} introuvable")]
    NotFound(ConversationId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
