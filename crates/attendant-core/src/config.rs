use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AttendantError, Result};
use crate::types::Persona;

/// Persona/instruction text that opens every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI customer service assistant. Your role is to:
- Provide excellent customer service with a friendly, professional tone
- Help customers with product information, order status, returns, technical issues, and general inquiries
- Be concise but thorough in your responses
- Ask clarifying questions when needed
- Provide accurate information about business hours, policies, and procedures
- Escalate complex issues appropriately
- Always be polite and patient
- Respond in Chinese (中文) when the customer asks in Chinese
- Be bilingual and helpful in both English and Chinese

Keep responses conversational and helpful. If you don't have specific information about a company's policies, provide general guidance and suggest contacting human support for specific details.";

/// Model identifiers accepted by [`AttendantConfig::validate`].
///
/// Anything outside this list is rejected at load time rather than passed
/// through to the remote endpoint.
pub const RECOGNIZED_MODELS: &[&str] = &[
    "meta-llama/llama-3.1-8b-instruct",
    "deepseek/deepseek-r1:free",
    "deepseek/deepseek-chat-v3-0324:free",
    "mistralai/mistral-7b-instruct",
    "openai/gpt-3.5-turbo",
    "anthropic/claude-3.5-sonnet",
    "openai/gpt-4",
];

/// Top-level configuration for the Attendant assistant.
///
/// Loaded once at startup and immutable for the process lifetime. Each
/// section corresponds to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendantConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl AttendantConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// value is out of range.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AttendantConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or is invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject out-of-range values.
    ///
    /// Enumerated checks rather than silent pass-through: an unrecognized
    /// model, a zero token budget, or a temperature outside `[0, 2]` is a
    /// configuration error, never a runtime surprise.
    pub fn validate(&self) -> Result<()> {
        if self.chat.max_message_chars == 0 {
            return Err(AttendantError::Config(
                "chat.max_message_chars must be at least 1".to_string(),
            ));
        }
        if self.remote.endpoint.trim().is_empty() {
            return Err(AttendantError::Config(
                "remote.endpoint must not be empty".to_string(),
            ));
        }
        if !RECOGNIZED_MODELS.contains(&self.remote.model.as_str()) {
            return Err(AttendantError::Config(format!(
                "remote.model '{}' is not a recognized model ID",
                self.remote.model
            )));
        }
        if self.remote.max_tokens == 0 {
            return Err(AttendantError::Config(
                "remote.max_tokens must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.remote.temperature) {
            return Err(AttendantError::Config(format!(
                "remote.temperature {} is outside [0, 2]",
                self.remote.temperature
            )));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Chat session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// When true, no network call is ever made; replies come from the
    /// canned-response tables.
    pub demo_mode: bool,
    /// Which keyword/reply tables the local responder uses.
    pub persona: Persona,
    /// Instruction message that opens every conversation.
    pub system_prompt: String,
    /// Maximum accepted message length in characters.
    pub max_message_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            persona: Persona::General,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_message_chars: 1000,
        }
    }
}

/// Remote completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Chat-completions URL.
    pub endpoint: String,
    /// Bearer token for the endpoint.
    pub api_key: String,
    /// Model identifier; must be on [`RECOGNIZED_MODELS`].
    pub model: String,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Sampling temperature, `0.0..=2.0`.
    pub temperature: f32,
    /// Whole-request timeout in seconds; expiry surfaces as a network error.
    pub request_timeout_secs: u64,
    /// Advisory origin header (`HTTP-Referer`).
    pub referer: String,
    /// Advisory client-name header (`X-Title`).
    pub app_title: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "meta-llama/llama-3.1-8b-instruct".to_string(),
            max_tokens: 150,
            temperature: 0.5,
            request_timeout_secs: 30,
            referer: "https://localhost".to_string(),
            app_title: "AI Customer Service".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AttendantConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.chat.demo_mode);
        assert_eq!(config.chat.persona, Persona::General);
        assert_eq!(config.chat.max_message_chars, 1000);
        assert_eq!(config.remote.model, "meta-llama/llama-3.1-8b-instruct");
        assert_eq!(config.remote.max_tokens, 150);
        assert_eq!(config.remote.temperature, 0.5);
        assert_eq!(config.remote.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AttendantConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[chat]
demo_mode = false
persona = "print_service"
max_message_chars = 500

[remote]
api_key = "sk-or-test"
model = "mistralai/mistral-7b-instruct"
max_tokens = 300
temperature = 0.2
"#;
        let file = create_temp_config(content);
        let config = AttendantConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!(!config.chat.demo_mode);
        assert_eq!(config.chat.persona, Persona::PrintService);
        assert_eq!(config.chat.max_message_chars, 500);
        assert_eq!(config.remote.model, "mistralai/mistral-7b-instruct");
        assert_eq!(config.remote.max_tokens, 300);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
demo_mode = false
"#;
        let file = create_temp_config(content);
        let config = AttendantConfig::load(file.path()).unwrap();
        assert!(!config.chat.demo_mode);
        // Everything else falls back to defaults.
        assert_eq!(config.chat.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.remote.max_tokens, 150);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let file = create_temp_config("not = [valid");
        assert!(AttendantConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let path = Path::new("/nonexistent/attendant/config.toml");
        assert!(AttendantConfig::load(path).is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let path = Path::new("/nonexistent/attendant/config.toml");
        let config = AttendantConfig::load_or_default(path);
        assert!(config.chat.demo_mode);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AttendantConfig::default();
        config.remote.model = "openai/gpt-4".to_string();
        config.remote.temperature = 1.5;
        config.save(&path).unwrap();

        let reloaded = AttendantConfig::load(&path).unwrap();
        assert_eq!(reloaded.remote.model, "openai/gpt-4");
        assert_eq!(reloaded.remote.temperature, 1.5);
    }

    // ---- Validation rejections ----

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let mut config = AttendantConfig::default();
        config.remote.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_temperature() {
        let mut config = AttendantConfig::default();
        config.remote.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_temperature_above_two() {
        let mut config = AttendantConfig::default();
        config.remote.temperature = 2.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_temperature_boundaries() {
        let mut config = AttendantConfig::default();
        config.remote.temperature = 0.0;
        assert!(config.validate().is_ok());
        config.remote.temperature = 2.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unrecognized_model() {
        let mut config = AttendantConfig::default();
        config.remote.model = "acme/imaginary-model".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not a recognized model ID"));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = AttendantConfig::default();
        config.remote.endpoint = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_message_limit() {
        let mut config = AttendantConfig::default();
        config.chat.max_message_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_out_of_range_values() {
        let content = r#"
[remote]
max_tokens = 0
"#;
        let file = create_temp_config(content);
        assert!(AttendantConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_every_recognized_model_validates() {
        for model in RECOGNIZED_MODELS {
            let mut config = AttendantConfig::default();
            config.remote.model = model.to_string();
            assert!(config.validate().is_ok(), "{} should validate", model);
        }
    }
}
