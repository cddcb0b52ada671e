//! Core types, configuration, and errors for the Attendant chat assistant.
//!
//! This crate holds everything shared across the system: the conversation
//! message model, the user-facing error taxonomy, the validated configuration,
//! and the domain events consumed by presentation layers.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod types;

pub use config::{AttendantConfig, ChatConfig, GeneralConfig, RemoteConfig};
pub use error::{AttendantError, Result};
pub use events::ChatEvent;
pub use types::{ErrorKind, Message, Persona, Role, Timestamp};
