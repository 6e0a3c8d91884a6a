//! Process-wide configuration, built once at startup and passed explicitly
//! into constructors. Nothing reads ambient globals after initialization.

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::i18n::Language;

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default service endpoint base.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Model used for generative search.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Grounded searches routinely take over a minute.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Immutable application configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub language: Language,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Build the configuration from the environment.
    ///
    /// The credential is required; everything else has defaults.
    pub fn from_env(language: Language) -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .with_context(|| format!("{} environment variable not set", API_KEY_ENV))?;
        Ok(Self::new(language, api_key))
    }

    pub fn new(language: Language, api_key: String) -> Self {
        Self {
            language,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// The credential must never reach logs or screens.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("language", &self.language)
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
