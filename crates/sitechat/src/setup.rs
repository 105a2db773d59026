use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Display};

use sitechat_core::{Session, SessionBuilder};
use sitechat_gemini_model::{GeminiConfigBuilder, GeminiProvider};

/// The model identifier the widget is pinned to.
pub const MODEL_NAME: &str = "gemini-2.5-flash";

/// The environment variable holding the backend credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const SYSTEM_INSTRUCTION: &str = include_str!("./system_instruction.md");

/// A fatal configuration error.
///
/// The widget cannot function when this is returned; there is nothing to
/// retry until the configuration is fixed.
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for ConfigError {}

/// Creates the conversation session against the hosted backend.
///
/// The backend credential is read from the `GEMINI_API_KEY` environment
/// variable; its absence is a fatal configuration error. Construction is
/// local, the first network call happens on the first submission.
pub fn create_session() -> Result<Session, ConfigError> {
    let api_key = env::var(API_KEY_VAR).map_err(|_| ConfigError {
        message: format!("{API_KEY_VAR} environment variable is not set"),
    })?;

    debug!(model = MODEL_NAME, "creating chat session");

    let config = GeminiConfigBuilder::with_api_key(api_key)
        .with_model(MODEL_NAME)
        .build();
    Ok(SessionBuilder::with_provider(GeminiProvider::new(config))
        .with_system_instruction(SYSTEM_INSTRUCTION.trim())
        .build())
}
