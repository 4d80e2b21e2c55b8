//! Parsing of suggestion-model replies into JSON objects
//!
//! Models wrap JSON in markdown fences, chat-template tokens or chatty prose.
//! The parser tries, in order:
//!
//! 1. Direct JSON parse
//! 2. Clean known artifacts and retry
//! 3. Extract the first balanced JSON object from mixed content
//!
//! Fails with a suggestion error if no JSON object is found.

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::logging::{log_debug, log_warn};

use serde_json::Value;

/// Response parser with fallback strategies
pub(crate) struct ResponseParser;

impl ResponseParser {
    /// Parse model output into a JSON object
    pub(crate) fn parse_model_output(raw: &str) -> TaxonomyResult<Value> {
        log_debug!(
            content_length = raw.len(),
            content_preview = raw.chars().take(200).collect::<String>(),
            "Parsing suggestion model output"
        );

        if let Ok(structured) = serde_json::from_str::<Value>(raw) {
            return Self::validate_and_return(structured);
        }

        let cleaned = Self::clean_artifacts(raw);
        if cleaned != raw {
            if let Ok(structured) = serde_json::from_str::<Value>(&cleaned) {
                log_debug!("Parsed suggestion JSON after artifact cleaning");
                return Self::validate_and_return(structured);
            }
        }

        if let Some(json_str) = Self::extract_json_object(&cleaned) {
            if let Ok(structured) = serde_json::from_str::<Value>(&json_str) {
                log_debug!(
                    extracted_length = json_str.len(),
                    "Parsed suggestion JSON extracted from mixed content"
                );
                return Self::validate_and_return(structured);
            }
        }

        let preview = raw.chars().take(200).collect::<String>();
        log_warn!(
            content_preview = preview,
            "Suggestion model output contained no JSON object"
        );

        Err(TaxonomyError::suggestion(format!(
            "Could not parse a JSON object from model output: {}{}",
            preview,
            if raw.chars().count() > 200 { "..." } else { "" }
        )))
    }

    fn validate_and_return(response: Value) -> TaxonomyResult<Value> {
        match response.as_object() {
            None => Err(TaxonomyError::suggestion(
                "Model output must be a JSON object",
            )),
            Some(obj) if obj.is_empty() => Err(TaxonomyError::suggestion(
                "Model output cannot be an empty object",
            )),
            Some(_) => Ok(response),
        }
    }

    /// Strip markdown fences and chat-template tokens
    fn clean_artifacts(content: &str) -> String {
        content
            .replace("<|channel|>", "")
            .replace("```json", "")
            .replace("```JSON", "")
            .replace("```", "")
            .replace("<|end|>", "")
            .replace("<|start|>", "")
            .trim()
            .chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect()
    }

    fn extract_json_object(content: &str) -> Option<String> {
        let start_idx = content.find('{')?;
        let chars: Vec<char> = content[start_idx..].chars().collect();
        let end = Self::find_balanced_json_end(&chars)?;
        Some(chars[..=end].iter().collect())
    }

    /// Index of the brace closing the object that starts at `chars[0]`
    fn find_balanced_json_end(chars: &[char]) -> Option<usize> {
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (idx, ch) in chars.iter().enumerate() {
            if in_string {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match ch {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }

        None // Unbalanced braces
    }
}
