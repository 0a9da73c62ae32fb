use crate::llm::prompt;
use crate::llm::provider::{CompletionOptions, LlmProvider};
use crate::utils::error::DocsmithError;
use crate::walker::Language;

/// Client for requesting documented versions of source files.
///
/// Wraps a single [`LlmProvider`] behind an explicit, injectable object:
/// construct once, pass into the documenters. One outbound call is made per
/// [`CompletionClient::document_source`] invocation; a failed call is reported
/// once and never retried.
pub struct CompletionClient {
    provider: Box<dyn LlmProvider>,
    options: CompletionOptions,
}

impl CompletionClient {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider,
            // Deterministic output is preferable when rewriting files in place.
            options: CompletionOptions {
                max_tokens: None,
                temperature: Some(0.0),
            },
        }
    }

    /// Construct a client for a named provider, reading credentials from the
    /// environment.
    pub fn for_provider(name: &str, model: Option<String>) -> Result<Self, DocsmithError> {
        let provider: Box<dyn LlmProvider> = match name {
            #[cfg(feature = "openai")]
            "openai" => Box::new(crate::llm::providers::openai::OpenAIProvider::from_env(
                model,
            )?),
            #[cfg(feature = "anthropic")]
            "anthropic" => Box::new(
                crate::llm::providers::anthropic::AnthropicProvider::from_env(model)?,
            ),
            #[cfg(feature = "ollama")]
            "ollama" => Box::new(crate::llm::providers::ollama::OllamaProvider::from_env(
                model,
            )?),
            other => return Err(DocsmithError::invalid_provider(other)),
        };

        Ok(Self::new(provider))
    }

    /// Request a documented version of `source`.
    ///
    /// Returns the cleaned completion text, or a completion error when the
    /// remote call fails or the cleaned response is empty.
    pub async fn document_source(
        &self,
        source: &str,
        file_name: &str,
        language: Option<Language>,
    ) -> Result<String, DocsmithError> {
        let messages = prompt::documentation_messages(source, file_name, language);

        let response = self.provider.complete(&messages, &self.options).await?;
        tracing::debug!(
            "Completion for {} used {} tokens",
            file_name,
            response.tokens_used
        );

        let cleaned = prompt::clean_response(&response.content);
        if cleaned.is_empty() {
            return Err(DocsmithError::EmptyCompletion {
                provider: self.provider.name().to_string(),
            });
        }

        Ok(cleaned)
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model the underlying provider will call.
    pub fn model(&self) -> &str {
        self.provider.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::{CompletionResponse, Message};
    use async_trait::async_trait;

    struct CannedProvider {
        reply: String,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn complete(
            &self,
            _messages: &[Message],
            _options: &CompletionOptions,
        ) -> Result<CompletionResponse, DocsmithError> {
            Ok(CompletionResponse {
                content: self.reply.clone(),
                tokens_used: 1,
            })
        }

        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-1"
        }
    }

    #[tokio::test]
    async fn test_document_source_cleans_fences() {
        let client = CompletionClient::new(Box::new(CannedProvider {
            reply: "```rust\nfn main() {}\n```".to_string(),
        }));

        let result = client
            .document_source("fn main() {}", "main.rs", None)
            .await
            .unwrap();
        assert_eq!(result, "fn main() {}\n");
    }

    #[tokio::test]
    async fn test_document_source_empty_reply_is_error() {
        let client = CompletionClient::new(Box::new(CannedProvider {
            reply: "```\n```".to_string(),
        }));

        let result = client.document_source("x", "a.py", None).await;
        assert!(matches!(
            result,
            Err(DocsmithError::EmptyCompletion { .. })
        ));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = CompletionClient::for_provider("not-a-provider", None);
        assert!(matches!(
            result,
            Err(DocsmithError::ValidationError { .. })
        ));
    }
}
