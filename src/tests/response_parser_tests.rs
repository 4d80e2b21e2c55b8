//! Tests for ResponseParser
//!
//! Testing 3-tier fallback strategy for parsing suggestion model output into JSON.

use crate::error::TaxonomyError;
use crate::internals::response_parser::ResponseParser;

#[test]
fn test_parse_direct_json() {
    let input = r#"{"suggestion": "Retry.", "confidence": "high"}"#;
    let result = ResponseParser::parse_model_output(input).unwrap();
    assert_eq!(result["suggestion"], "Retry.");
    assert_eq!(result["confidence"], "high");
}

#[test]
fn test_parse_with_fences() {
    let input = "```json\n{\"suggestion\": \"Retry.\", \"steps\": [\"a\"]}\n```";
    let result = ResponseParser::parse_model_output(input).unwrap();
    assert_eq!(result["suggestion"], "Retry.");
    assert_eq!(result["steps"][0], "a");
}

#[test]
fn test_parse_mixed_content() {
    let input = r#"Sure! Here it is: {"suggestion": "Back off."} Let me know if that helps."#;
    let result = ResponseParser::parse_model_output(input).unwrap();
    assert_eq!(result["suggestion"], "Back off.");
}

#[test]
fn test_parse_braces_inside_strings() {
    let input = r#"Answer: {"suggestion": "Escape } and { in \"quotes\"", "steps": []} done"#;
    let result = ResponseParser::parse_model_output(input).unwrap();
    assert_eq!(result["suggestion"], "Escape } and { in \"quotes\"");
}

#[test]
fn test_parse_plain_text_fails() {
    let result = ResponseParser::parse_model_output("I cannot help with that.");
    assert!(matches!(result, Err(TaxonomyError::Suggestion { .. })));
}

#[test]
fn test_parse_empty_object_fails() {
    assert!(ResponseParser::parse_model_output("{}").is_err());
}

#[test]
fn test_parse_non_object_fails() {
    assert!(ResponseParser::parse_model_output(r#"["retry", "later"]"#).is_err());
}

#[test]
fn test_parse_unbalanced_fails() {
    assert!(ResponseParser::parse_model_output(r#"prefix {"suggestion": "x""#).is_err());
}
