//! Prompt construction and response cleanup for documentation requests.

use crate::llm::provider::Message;
use crate::walker::Language;
use std::sync::LazyLock;

/// Matches Markdown code fence lines the model sometimes wraps its answer in,
/// despite being told not to.
static FENCE_LINE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?m)^```[^\n]*$\n?").expect("fence pattern is invalid")
});

const SYSTEM_PROMPT: &str = "You are a highly skilled documentation specialist. \
You review source files and add clear, concise, and essential documentation \
comments in the idiomatic style of the file's language.";

/// Build the message sequence for documenting one source file.
///
/// The instruction is fixed; only the file name, language, and code vary.
pub fn documentation_messages(
    source: &str,
    file_name: &str,
    language: Option<Language>,
) -> Vec<Message> {
    let language_name = language.map_or("source", Language::name);

    let instruction = format!(
        "Review the following {language_name} file ({file_name}). Analyze its \
functions, types, and module structure, and add documentation comments that \
describe the purpose of each element, covering parameters, return values, and \
error conditions. Keep the code itself unchanged apart from the added \
documentation.\n\n\
Provide the revised file in plain text, without any additional symbols, \
formatting, or delimiters. Do not wrap the output in Markdown code fences.\n\n\
Here is the code:\n{source}"
    );

    vec![Message::system(SYSTEM_PROMPT), Message::user(instruction)]
}

/// Strip Markdown code fences from a model response and trim surrounding
/// whitespace, preserving a trailing newline.
pub fn clean_response(response: &str) -> String {
    let stripped = FENCE_LINE.replace_all(response, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}
