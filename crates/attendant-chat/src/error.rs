//! Error types for the conversational core.

use attendant_core::ErrorKind;

use crate::types::{Intent, Language};

/// Errors from the chat session itself.
///
/// These reject a submission outright; they are distinct from
/// [`CompletionError`], which describes a turn that was accepted but whose
/// remote resolution failed.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("a turn is already awaiting its response")]
    Busy,
    #[error("no reply configured for {language:?}/{intent:?}")]
    MissingReply { language: Language, intent: Intent },
    #[error("http client: {0}")]
    Http(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// A failed remote completion, classified into the stable taxonomy.
///
/// `message` carries diagnostic detail for logs; the fixed user-facing
/// template hangs off `kind` ([`ErrorKind::user_message`]).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CompletionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CompletionError {
    /// Create an error of the given kind with its fixed template as message.
    pub fn of_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
        }
    }
}
