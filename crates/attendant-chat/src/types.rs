use attendant_core::{ErrorKind, Timestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// Classification
// =============================================================================

/// Detected message language.
///
/// Detection is script-based: a message counts as Chinese if it contains at
/// least one CJK Unified Ideograph, otherwise it is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Chinese,
    Other,
}

impl Language {
    /// All languages, in table order.
    pub const ALL: [Language; 2] = [Language::Chinese, Language::Other];

    pub(crate) fn index(self) -> usize {
        match self {
            Language::Chinese => 0,
            Language::Other => 1,
        }
    }
}

/// Customer intent, as detected by keyword matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Order status, purchases, general "help me with my order".
    Order,
    /// Returns and refunds.
    Returns,
    /// Technical problems.
    Technical,
    /// Business hours and availability.
    Hours,
    /// Plain greeting.
    Greeting,
    /// Nothing matched.
    Fallback,
}

impl Intent {
    /// All intents, in table order.
    pub const ALL: [Intent; 6] = [
        Intent::Order,
        Intent::Returns,
        Intent::Technical,
        Intent::Hours,
        Intent::Greeting,
        Intent::Fallback,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Intent::Order => 0,
            Intent::Returns => 1,
            Intent::Technical => 2,
            Intent::Hours => 3,
            Intent::Greeting => 4,
            Intent::Fallback => 5,
        }
    }
}

/// The classifier's verdict for one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub language: Language,
    pub intent: Intent,
}

// =============================================================================
// Session state
// =============================================================================

/// Turn-processing state of a chat session.
///
/// A session accepts a new submission only while `Idle`; exactly one turn is
/// in flight at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingResponse,
}

// =============================================================================
// Turn outcome
// =============================================================================

/// The resolved result of one submitted turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// An assistant reply, appended to the transcript.
    Reply { text: String, created_at: Timestamp },

    /// A failed remote turn.
    ///
    /// `display` is the fixed apology for the presentation layer; it is never
    /// appended to the transcript, so the failure text cannot be replayed to
    /// the model as prior assistant output.
    Failure {
        kind: ErrorKind,
        display: String,
        created_at: Timestamp,
    },
}
