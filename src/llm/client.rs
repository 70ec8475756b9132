use anyhow::{Context, Result, anyhow};
use async_openai::{Client, config::OpenAIConfig};

use super::response::{CompletionRequest, request_single_text_response};
use super::secrets::{API_KEY_ENV, ApiKeySource, get_api_key_from_sources};

/// Anything that can turn a prompt into completion text.
#[allow(async_fn_in_trait)]
pub trait CompletionBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

pub struct OpenAiCompletion {
    client: Client<OpenAIConfig>,
}

impl OpenAiCompletion {
    /// Builds the client even without a key; the endpoint rejects the request
    /// later and the session reports it.
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            client: initialize_client(api_key.unwrap_or_default()),
        }
    }
}

impl CompletionBackend for OpenAiCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        request_single_text_response(&self.client, request).await
    }
}

pub async fn test_configured_api_key() -> Result<ApiKeySource> {
    let lookup = get_api_key_from_sources()?;
    let disabled = || {
        anyhow!(
            "No API key configured. Set {} or run `quizgen llm --set <KEY>`.",
            API_KEY_ENV
        )
    };
    let key = lookup.api_key.ok_or_else(disabled)?;
    let source = lookup.source.ok_or_else(disabled)?;
    let client = initialize_client(&key);
    healthcheck_client(&client).await?;
    Ok(source)
}

fn initialize_client(api_key: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new().with_api_key(api_key);
    Client::with_config(config)
}

async fn healthcheck_client(client: &Client<OpenAIConfig>) -> Result<()> {
    client
        .models()
        .list()
        .await
        .context("Failed to validate API key with OpenAI")?;
    Ok(())
}
