use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Compiled regex patterns for redacting sensitive data.
/// Using LazyLock for thread-safe one-time initialization.
///
/// Note: These patterns are static compile-time constants that are validated by tests.
/// The expect() calls here are acceptable because:
/// 1. Patterns are known-valid literals, not runtime input
/// 2. Tests verify all patterns compile successfully
/// 3. Any regex error would be caught immediately at first use
static REDACTION_PATTERNS: LazyLock<[(regex::Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (
            regex::Regex::new(r"(api[_-]?key[=:\s]+)[^\s]+")
                .expect("api_key redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(token[=:\s]+)[^\s]+").expect("token redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(?i)(bearer\s+)[^\s]+")
                .expect("bearer redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(sk-[a-zA-Z0-9]{8,})")
                .expect("sk-key redaction pattern is invalid"),
            "[REDACTED]",
        ),
    ]
});

#[derive(Debug, Error)]
pub enum DocsmithError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Completion error: {provider} - {}", redact_sensitive_data(message))]
    Completion { provider: String, message: String },

    #[error("Empty completion response from {provider}")]
    EmptyCompletion { provider: String },

    #[error("Rate limited by {provider}, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },

    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Redact sensitive information from error messages.
fn redact_sensitive_data(message: &str) -> String {
    let mut result = message.to_string();
    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }
    result
}

impl DocsmithError {
    pub fn invalid_provider(provider: &str) -> Self {
        DocsmithError::ValidationError {
            message: format!("Invalid provider: '{}'", provider),
            suggestion: "Valid providers are: openai, anthropic, ollama".to_string(),
        }
    }

    pub fn missing_api_key(provider: &str) -> Self {
        let env_var = format!("{}_API_KEY", provider.to_uppercase());
        DocsmithError::ValidationError {
            message: format!("API key not configured for provider '{}'", provider),
            suggestion: format!(
                "Set the {} environment variable or add it to your config file",
                env_var
            ),
        }
    }

    /// Whether the error came from the completion call rather than the local
    /// filesystem. The documenter uses this to classify per-file failures.
    pub fn is_completion_error(&self) -> bool {
        matches!(
            self,
            DocsmithError::Completion { .. }
                | DocsmithError::EmptyCompletion { .. }
                | DocsmithError::RateLimited { .. }
                | DocsmithError::NetworkError { .. }
        )
    }
}

impl From<serde_json::Error> for DocsmithError {
    fn from(err: serde_json::Error) -> Self {
        DocsmithError::ParseError {
            message: "Failed to parse JSON response".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for DocsmithError {
    fn from(err: toml::de::Error) -> Self {
        DocsmithError::ParseError {
            message: "Failed to parse TOML configuration".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for DocsmithError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out. Check your network connection.".to_string()
        } else if err.is_connect() {
            "Failed to connect to server. Check your network connection.".to_string()
        } else if err.is_status() {
            format!(
                "HTTP error: {}",
                err.status()
                    .map_or("unknown".to_string(), |s| s.to_string())
            )
        } else {
            "Network request failed".to_string()
        };

        DocsmithError::NetworkError {
            message,
            source: Some(Box::new(err)),
        }
    }
}

/// Format an error for terminal display.
///
/// In verbose mode the full source chain is printed as well.
pub fn format_error(error: &DocsmithError, verbose: bool) -> String {
    let mut out = format!("\u{26a0} Error: {}", error);

    if verbose {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            out.push_str(&format!("\nCaused by: {}", cause));
            source = cause.source();
        }
    }

    out
}
