use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Conversation model
// =============================================================================

/// The author of a conversation message.
///
/// Values are stable wire identifiers (`system`/`user`/`assistant`) and are
/// never reinterpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The persona/instruction message that opens every conversation.
    System,
    /// A message typed by the customer.
    User,
    /// A reply produced for the customer, locally or remotely.
    Assistant,
}

/// One message in a conversation transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

// =============================================================================
// Error taxonomy
// =============================================================================

/// Stable classification of a failed remote completion.
///
/// Each kind is bound to a fixed user-facing template via
/// [`ErrorKind::user_message`]; how (and whether) that template is rendered is
/// a presentation concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// HTTP 402: the account behind the API key has no credit left.
    NoCredits,
    /// HTTP 401: the API key was rejected.
    InvalidKey,
    /// HTTP 429: too many requests.
    RateLimited,
    /// HTTP 400: the request itself was malformed (bad model ID or similar).
    BadConfiguration,
    /// The endpoint could not be reached, or the request timed out.
    NetworkError,
    /// Any other failure, including malformed success bodies.
    Unknown,
}

impl ErrorKind {
    /// Returns the fixed user-facing template for this kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::NoCredits => {
                "您的OpenRouter帳戶需要充值。請添加積分以繼續使用AI客服。"
            }
            ErrorKind::InvalidKey => "API密鑰無效。請檢查您的OpenRouter API密鑰。",
            ErrorKind::RateLimited => "請求頻率過高。請稍等片刻後再試。",
            ErrorKind::BadConfiguration => "Bad request. Please check your configuration.",
            ErrorKind::NetworkError => "網絡錯誤。請檢查您的網絡連接。",
            ErrorKind::Unknown => "發生錯誤。請再試一次。",
        }
    }
}

// =============================================================================
// Persona
// =============================================================================

/// The deployment persona a conversation is configured with.
///
/// Selects the keyword table and canned-reply table used when responses are
/// synthesized locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// Generic customer service.
    #[default]
    General,
    /// 3D print service desk.
    PrintService,
}

// =============================================================================
// Newtype Wrappers - Temporal
// =============================================================================

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================
