use crate::llm::provider::{CompletionOptions, CompletionResponse, LlmProvider, Message};
use crate::utils::error::DocsmithError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_HOST: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.1:70b";

/// Local inference via Ollama's OpenAI-compatible chat endpoint.
pub struct OllamaProvider {
    host: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

impl OllamaProvider {
    pub fn new(host: String, model: String) -> Result<Self, DocsmithError> {
        // Local models can be slow; allow a generous timeout.
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()?;
        Ok(Self {
            host,
            model,
            client,
        })
    }

    pub fn from_env(model: Option<String>) -> Result<Self, DocsmithError> {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::new(host, model.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DocsmithError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.host))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DocsmithError::Completion {
                provider: "ollama".to_string(),
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        let response_body: ChatResponse = response.json().await?;

        let content = response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let tokens_used = response_body
            .usage
            .map(|u| u.prompt_tokens + u.completion_tokens)
            .unwrap_or(0);

        Ok(CompletionResponse {
            content,
            tokens_used,
        })
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider =
            OllamaProvider::new(DEFAULT_HOST.to_string(), DEFAULT_MODEL.to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().model(), "llama3.1:70b");
    }
}
