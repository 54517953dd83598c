//! API key resolution: environment first, system keyring second

use keyring::Entry;

use super::error::GroqError;

/// Environment variable checked before the keyring
const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Service name for keyring storage
const SERVICE_NAME: &str = "snapquiz";
/// Entry name for the API key
const API_KEY_ENTRY: &str = "groq-api-key";

/// Manages Groq API key storage
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Resolve the API key: `GROQ_API_KEY` env var wins, then the keyring
    pub fn get_api_key() -> Result<String, GroqError> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key.trim().to_string());
            }
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GroqError::KeyringError(e.to_string()))?;

        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => GroqError::ApiKeyNotFound,
            _ => GroqError::KeyringError(e.to_string()),
        })
    }

    /// Store the API key in the system keyring
    pub fn set_api_key(key: &str) -> Result<(), GroqError> {
        if !Self::validate_key_format(key) {
            return Err(GroqError::InvalidApiKey);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GroqError::KeyringError(e.to_string()))?;

        entry.set_password(key).map_err(|e| GroqError::KeyringError(e.to_string()))
    }

    /// Check if an API key is available
    pub fn has_api_key() -> bool {
        Self::get_api_key().is_ok()
    }

    /// Delete the stored API key from the keyring
    pub fn delete_api_key() -> Result<(), GroqError> {
        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GroqError::KeyringError(e.to_string()))?;

        entry.delete_credential().map_err(|e| GroqError::KeyringError(e.to_string()))
    }

    /// Validate API key format
    fn validate_key_format(key: &str) -> bool {
        // Groq API keys start with "gsk_"
        key.starts_with("gsk_") && key.len() > 20
    }

    /// Mask an API key for display (show first and last 4 chars)
    pub fn mask_key(key: &str) -> String {
        if key.len() <= 12 {
            return "*".repeat(key.len());
        }
        let prefix = &key[..8];
        let suffix = &key[key.len() - 4..];
        format!("{}...{}", prefix, suffix)
    }
}
