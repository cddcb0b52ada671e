//! Ordered conversation log.
//!
//! The single source of truth for a session's context: insertion order is
//! chronological order is the order sent to the remote endpoint.

use attendant_core::{Message, Role};

/// Append-only message log for one conversation.
///
/// Invariants: the first element is always exactly one `system` message, and
/// messages are never removed, reordered, or deduplicated. Collaborators see
/// the log only through read-only snapshots.
#[derive(Clone, Debug)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Create a log opened by the given system message.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::new(Role::System, system_prompt)],
        }
    }

    /// Append one message to the end of the log.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// The full ordered sequence, for use as request context.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> &Message {
        // The log is never empty: it is constructed around its system message.
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; a log contains at least its system message.
    pub fn is_empty(&self) -> bool {
        false
    }
}
