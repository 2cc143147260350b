//! LLM provider factory.
//!
//! Builds the configured completion client, resolving endpoints and
//! checking that required secrets are present.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use std::sync::Arc;
use uxsearch_core::{AppError, AppResult};

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key, required by hosted providers
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or a required
/// secret is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Config(format!("Unknown provider: {}", provider)))?;

    let api_key = match api_key {
        Some(key) => key,
        None if provider_type.requires_api_key() => {
            return Err(AppError::Config(format!(
                "Provider {} requires an API key",
                provider_type.as_str()
            )));
        }
        None => "",
    };

    let client: Arc<dyn LlmClient> = match provider_type {
        ProviderType::OpenAI => match endpoint {
            Some(base_url) => Arc::new(OpenAiClient::with_base_url(api_key, base_url)),
            None => Arc::new(OpenAiClient::new(api_key)),
        },
        ProviderType::Ollama => match endpoint {
            Some(base_url) => Arc::new(OllamaClient::with_base_url(base_url)),
            None => Arc::new(OllamaClient::new()),
        },
    };

    tracing::debug!("Created {} client", provider_type.as_str());
    Ok(client)
}
