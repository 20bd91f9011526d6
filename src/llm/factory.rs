//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients. Credentials
//! are passed in by the caller; nothing here reads the environment.

use crate::error::{QuillError, Result};
use crate::llm::{GeminiClient, GeminiConfig, LlmClient, LlmProvider, MockLlmClient};

/// Creates an LLM client for the given provider.
///
/// Providers that call a remote API require `api_key`; a missing key is a
/// configuration error naming the variable the key is usually kept in.
pub fn create_client(
    provider: LlmProvider,
    api_key: Option<String>,
    model: &str,
    timeout_secs: u64,
) -> Result<Box<dyn LlmClient>> {
    match provider {
        LlmProvider::Gemini => {
            let key = require_key(provider, api_key)?;
            let config = GeminiConfig::new(key, model).with_timeout(timeout_secs);
            Ok(Box::new(GeminiClient::new(config)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}

fn require_key(provider: LlmProvider, api_key: Option<String>) -> Result<String> {
    match api_key {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(QuillError::config(format!(
            "No API key configured for {}. Set {}.",
            provider,
            provider.api_key_env().unwrap_or("an API key")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mock_client() {
        let client = create_client(LlmProvider::Mock, None, "mock", 30);
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_gemini_without_key_fails() {
        let result = create_client(LlmProvider::Gemini, None, "gemini-1.5-pro", 30);
        let err = result.err().unwrap();
        assert_eq!(
            err.to_string(),
            "Configuration error: No API key configured for gemini. Set GOOGLE_API_KEY."
        );
    }

    #[test]
    fn test_create_gemini_with_blank_key_fails() {
        let result = create_client(
            LlmProvider::Gemini,
            Some("  ".to_string()),
            "gemini-1.5-pro",
            30,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_gemini_with_provided_key() {
        let result = create_client(
            LlmProvider::Gemini,
            Some("test-key".to_string()),
            "gemini-1.5-pro",
            30,
        );
        assert!(result.is_ok());
    }
}
