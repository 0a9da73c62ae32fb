use crate::llm::provider::{CompletionOptions, CompletionResponse, LlmProvider, Message};
use crate::utils::error::DocsmithError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAIProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

/// Request body for the OpenAI chat completions API.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
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

/// Error envelope returned by the OpenAI API.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

impl OpenAIProvider {
    pub fn new(api_key: String, model: String) -> Result<Self, DocsmithError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            api_key,
            model,
            base_url: OPENAI_API_URL.to_string(),
            client,
        })
    }

    pub fn from_env(model: Option<String>) -> Result<Self, DocsmithError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| DocsmithError::missing_api_key("openai"))?;
        Self::new(api_key, model.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
    }

    /// Override the API base URL. Used in tests against a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DocsmithError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(DocsmithError::RateLimited {
                provider: "openai".to_string(),
                retry_after,
            });
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(DocsmithError::Completion {
                    provider: "openai".to_string(),
                    message: format!(
                        "{}: {}",
                        error.error.error_type.as_deref().unwrap_or("error"),
                        error.error.message
                    ),
                });
            }

            return Err(DocsmithError::Completion {
                provider: "openai".to_string(),
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
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let provider = OpenAIProvider::new("sk-test".to_string(), DEFAULT_MODEL.to_string())
            .unwrap();
        assert_eq!(provider.model(), "gpt-4o");
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_request_serialization_omits_unset_options() {
        let messages = vec![Message::user("hello")];
        let request = ChatRequest {
            model: "gpt-4o",
            messages: &messages,
            max_tokens: None,
            temperature: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }
}
