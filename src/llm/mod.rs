pub mod client;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use client::CompletionClient;
pub use provider::{CompletionOptions, CompletionResponse, LlmProvider, Message};
