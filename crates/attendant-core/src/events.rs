use serde::{Deserialize, Serialize};

use crate::types::{ErrorKind, Role, Timestamp};

/// Domain events emitted by a chat session as a turn resolves.
///
/// Events are consumed by the presentation layer (message rendering, error
/// banners); the session itself never renders anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChatEvent {
    /// A message was appended to the conversation transcript.
    MessageAppended {
        role: Role,
        content: String,
        created_at: Timestamp,
    },

    /// A turn failed to resolve remotely.
    ///
    /// `display` is the fixed apology shown to the customer; the failure text
    /// never enters the conversation transcript.
    TurnFailed {
        kind: ErrorKind,
        display: String,
        created_at: Timestamp,
    },
}
