//! Common test utilities and fixtures for integration tests.

use async_trait::async_trait;
use docsmith::llm::{CompletionOptions, CompletionResponse, LlmProvider, Message};
use docsmith::utils::error::DocsmithError;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Creates a mock project structure for testing.
pub fn create_mock_project(dir: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = dir.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    root
}

/// Extract the original source from the documentation prompt.
///
/// The user message embeds the file content after a fixed marker line.
fn source_from_messages(messages: &[Message]) -> String {
    messages
        .last()
        .and_then(|m| m.content.split_once("Here is the code:\n"))
        .map(|(_, source)| source.to_string())
        .unwrap_or_default()
}

/// Stub provider that prepends a documentation marker to the original source.
pub struct EchoDocProvider;

#[async_trait]
impl LlmProvider for EchoDocProvider {
    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DocsmithError> {
        let source = source_from_messages(messages);
        Ok(CompletionResponse {
            content: format!("# documented\n{}", source),
            tokens_used: 42,
        })
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }
}

/// Stub provider whose every completion call fails.
pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn complete(
        &self,
        _messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DocsmithError> {
        Err(DocsmithError::Completion {
            provider: "failing".to_string(),
            message: "simulated completion failure".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-1"
    }
}
