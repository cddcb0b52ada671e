//! Conversational core for the Attendant customer-service assistant.
//!
//! Maintains ordered conversation context, classifies intent and language for
//! offline (demo) replies, forwards the conversation to a remote completion
//! endpoint otherwise, and maps remote failures into a stable user-facing
//! error taxonomy.

pub mod classifier;
pub mod client;
pub mod engine;
pub mod error;
pub mod responder;
pub mod store;
pub mod types;

pub use classifier::{contains_chinese, IntentClassifier, IntentRule};
pub use client::{CompletionBackend, OpenRouterClient};
pub use engine::{ChatSession, APOLOGY};
pub use error::{ChatError, CompletionError};
pub use responder::{LocalResponder, ResponseTable};
pub use store::ConversationLog;
pub use types::{Classification, Intent, Language, SessionState, TurnOutcome};
