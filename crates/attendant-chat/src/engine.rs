//! Per-conversation resolution engine.
//!
//! A [`ChatSession`] owns one conversation: its log, its configuration, and
//! the route to a reply (canned tables in demo mode, the remote completion
//! endpoint otherwise). Sessions are independent instances; there is no
//! process-wide state, and a multi-conversation embedder simply constructs
//! one session per conversation.

use std::sync::{Mutex, MutexGuard};

use attendant_core::{AttendantConfig, ChatConfig, ChatEvent, Message, Role, Timestamp};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classifier::IntentClassifier;
use crate::client::{CompletionBackend, OpenRouterClient};
use crate::error::ChatError;
use crate::responder::LocalResponder;
use crate::store::ConversationLog;
use crate::types::{SessionState, TurnOutcome};

/// Fixed apology shown to the customer whenever a remote turn fails.
pub const APOLOGY: &str = "I apologize, but I'm experiencing technical difficulties right now. \
     Please try again in a moment or contact our human support team for immediate assistance.";

struct SessionInner {
    log: ConversationLog,
    state: SessionState,
    events: Vec<ChatEvent>,
    last_message_at: Timestamp,
}

/// One conversation and its turn-processing loop.
pub struct ChatSession {
    id: Uuid,
    config: ChatConfig,
    classifier: IntentClassifier,
    responder: LocalResponder,
    backend: Box<dyn CompletionBackend>,
    started_at: Timestamp,
    inner: Mutex<SessionInner>,
}

impl ChatSession {
    /// Create a session backed by the configured remote endpoint.
    pub fn new(config: &AttendantConfig) -> Result<Self, ChatError> {
        let backend = OpenRouterClient::new(config.remote.clone())?;
        Ok(Self::with_backend(config.chat.clone(), Box::new(backend)))
    }

    /// Create a session over an explicit completion backend.
    pub fn with_backend(chat: ChatConfig, backend: Box<dyn CompletionBackend>) -> Self {
        let now = Timestamp::now();
        let log = ConversationLog::new(chat.system_prompt.clone());
        Self {
            id: Uuid::new_v4(),
            classifier: IntentClassifier::for_persona(chat.persona),
            responder: LocalResponder::for_persona(chat.persona),
            backend,
            started_at: now,
            inner: Mutex::new(SessionInner {
                log,
                state: SessionState::Idle,
                events: Vec::new(),
                last_message_at: now,
            }),
            config: chat,
        }
    }

    /// Submit one customer message and resolve it into a [`TurnOutcome`].
    ///
    /// Empty (after trimming) and over-length messages are rejected without
    /// touching the log. Only one turn may be in flight: a submission while a
    /// previous turn awaits its response is rejected with [`ChatError::Busy`].
    /// The user message is appended before resolution starts; the assistant
    /// message is appended only for a successful reply. A failed turn never
    /// writes the failure text into the log, so it can never be replayed to
    /// the model as prior assistant output. The session returns to idle on
    /// every path; failures are recoverable at the turn level.
    pub async fn submit(&self, text: &str) -> Result<TurnOutcome, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if trimmed.chars().count() > self.config.max_message_chars {
            return Err(ChatError::MessageTooLong(self.config.max_message_chars));
        }

        // Begin the turn: claim the in-flight slot and append the user turn.
        let context = {
            let mut inner = self.lock_inner()?;
            if inner.state == SessionState::AwaitingResponse {
                return Err(ChatError::Busy);
            }
            inner.state = SessionState::AwaitingResponse;

            let now = Timestamp::now();
            inner.log.append(Role::User, trimmed);
            inner.last_message_at = now;
            inner.events.push(ChatEvent::MessageAppended {
                role: Role::User,
                content: trimmed.to_string(),
                created_at: now,
            });
            inner.log.snapshot().to_vec()
        };

        // Resolve. The lock is not held across the await; the state flag is
        // what keeps a second submission out.
        let outcome = if self.config.demo_mode {
            let classification = self.classifier.classify(trimmed);
            TurnOutcome::Reply {
                text: self.responder.respond(&classification).to_string(),
                created_at: Timestamp::now(),
            }
        } else {
            match self.backend.complete(&context).await {
                Ok(text) => TurnOutcome::Reply {
                    text,
                    created_at: Timestamp::now(),
                },
                Err(e) => {
                    warn!(session = %self.id, kind = ?e.kind, "Turn failed: {}", e);
                    TurnOutcome::Failure {
                        kind: e.kind,
                        display: APOLOGY.to_string(),
                        created_at: Timestamp::now(),
                    }
                }
            }
        };

        // Finish the turn. The session goes back to idle on every path.
        {
            let mut inner = self.lock_inner()?;
            match &outcome {
                TurnOutcome::Reply { text, created_at } => {
                    inner.log.append(Role::Assistant, text.clone());
                    inner.events.push(ChatEvent::MessageAppended {
                        role: Role::Assistant,
                        content: text.clone(),
                        created_at: *created_at,
                    });
                    info!(session = %self.id, "Turn resolved with a reply");
                }
                TurnOutcome::Failure {
                    kind,
                    display,
                    created_at,
                } => {
                    inner.events.push(ChatEvent::TurnFailed {
                        kind: *kind,
                        display: display.clone(),
                        created_at: *created_at,
                    });
                }
            }
            inner.last_message_at = Timestamp::now();
            inner.state = SessionState::Idle;
        }

        Ok(outcome)
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the session was created.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// When the session last appended a message or resolved a turn.
    pub fn last_message_at(&self) -> Timestamp {
        match self.inner.lock() {
            Ok(inner) => inner.last_message_at,
            Err(_) => self.started_at,
        }
    }

    /// Current turn-processing state.
    pub fn state(&self) -> SessionState {
        match self.inner.lock() {
            Ok(inner) => inner.state,
            Err(_) => SessionState::Idle,
        }
    }

    /// Read-only snapshot of the conversation log.
    pub fn snapshot(&self) -> Vec<Message> {
        match self.inner.lock() {
            Ok(inner) => inner.log.snapshot().to_vec(),
            Err(_) => Vec::new(),
        }
    }

    /// Number of messages in the log, system message included.
    pub fn len(&self) -> usize {
        match self.inner.lock() {
            Ok(inner) => inner.log.len(),
            Err(_) => 0,
        }
    }

    /// Always false; the log contains at least its system message.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Take all events accumulated since the last drain, oldest first.
    pub fn drain_events(&self) -> Vec<ChatEvent> {
        match self.inner.lock() {
            Ok(mut inner) => std::mem::take(&mut inner.events),
            Err(_) => Vec::new(),
        }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, SessionInner>, ChatError> {
        self.inner
            .lock()
            .map_err(|e| ChatError::Internal(format!("session lock poisoned: {}", e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
