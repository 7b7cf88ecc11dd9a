//! Best-effort session title generation.

use futures_util::StreamExt;

use journal_core::{CompletionEngine, CompletionEvent, CompletionRequest, EngineMessage};

use crate::error::AgentError;
use crate::prompts::TITLE_SYSTEM_PROMPT;

/// Longest title we will produce, in characters.
const MAX_TITLE_CHARS: usize = 80;

/// Generate a short title from the opening exchange of a session.
///
/// Failures here never surface to the user; callers log and move on with
/// an untitled session.
pub async fn generate_title(
    engine: &dyn CompletionEngine,
    user_text: &str,
    assistant_text: &str,
) -> Result<String, AgentError> {
    let request = CompletionRequest {
        system_prompt: TITLE_SYSTEM_PROMPT.to_string(),
        messages: vec![EngineMessage::user(format!(
            "User: {}\nAssistant: {}",
            user_text, assistant_text
        ))],
        tools: Vec::new(),
        max_tokens: Some(32),
        temperature: Some(0.3),
    };

    let mut stream = engine.stream(request).await?;
    let mut raw = String::new();
    while let Some(event) = stream.next().await {
        match event? {
            CompletionEvent::TextDelta(text) => raw.push_str(&text),
            CompletionEvent::Finished(_) => break,
            // No tools are advertised for this request.
            CompletionEvent::ToolCall(_) => {}
        }
    }

    let title = clean_title(&raw);
    if title.is_empty() {
        return Err(AgentError::EmptyCompletion(
            "title generation produced no text".to_string(),
        ));
    }
    Ok(title)
}

/// Trim whitespace and wrapping quotes, drop a trailing period, and cap
/// the length.
fn clean_title(raw: &str) -> String {
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .trim_end_matches('.')
        .trim();

    if cleaned.chars().count() > MAX_TITLE_CHARS {
        cleaned.chars().take(MAX_TITLE_CHARS).collect()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_strips_quotes_and_period() {
        assert_eq!(clean_title("\"A Week of Small Wins.\"\n"), "A Week of Small Wins");
        assert_eq!(clean_title("'Morning Reflections'"), "Morning Reflections");
        assert_eq!(clean_title("  Plain title  "), "Plain title");
    }

    #[test]
    fn test_clean_title_caps_length() {
        let long = "word ".repeat(40);
        assert_eq!(clean_title(&long).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_clean_title_empty() {
        assert_eq!(clean_title("  \"\" "), "");
    }
}
