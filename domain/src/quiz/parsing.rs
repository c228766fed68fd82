//! Question batch parsing from generator responses.
//!
//! Language models wrap JSON in prose and code fences more often than not.
//! [`parse_question_batch`] accepts, in order of preference:
//!
//! 1. a ` ```json ` fenced block
//! 2. any other fenced block containing valid JSON
//! 3. the whole response as raw JSON
//!
//! The JSON itself may be an array of records or an object with a
//! `questions` array. Parsing is all-or-nothing: a response that yields no
//! JSON is an error, never a placeholder question.

use crate::core::question::RawQuestion;
use thiserror::Error;

/// Errors from [`parse_question_batch`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBatchError {
    #[error("response contains no JSON")]
    NoJson,

    #[error("JSON does not match the question schema: {0}")]
    Schema(String),
}

/// Parse generator output into unvalidated question records.
pub fn parse_question_batch(response: &str) -> Result<Vec<RawQuestion>, ParseBatchError> {
    let blocks = fenced_blocks(response);

    let json = blocks
        .iter()
        .filter(|(lang, _)| lang.eq_ignore_ascii_case("json"))
        .chain(blocks.iter().filter(|(lang, _)| !lang.eq_ignore_ascii_case("json")))
        .find_map(|(_, body)| serde_json::from_str::<serde_json::Value>(body).ok())
        .or_else(|| serde_json::from_str::<serde_json::Value>(response.trim()).ok())
        .or_else(|| embedded_array(response))
        .ok_or(ParseBatchError::NoJson)?;

    records_from_json(json)
}

fn records_from_json(json: serde_json::Value) -> Result<Vec<RawQuestion>, ParseBatchError> {
    let array = match json {
        serde_json::Value::Array(_) => json,
        serde_json::Value::Object(mut map) => match map.remove("questions") {
            Some(inner @ serde_json::Value::Array(_)) => inner,
            _ => {
                return Err(ParseBatchError::Schema(
                    "expected an array or an object with a \"questions\" array".to_string(),
                ));
            }
        },
        other => {
            return Err(ParseBatchError::Schema(format!(
                "expected an array, got {}",
                other
            )));
        }
    };

    serde_json::from_value(array).map_err(|e| ParseBatchError::Schema(e.to_string()))
}

/// Collect ``` fenced blocks as (language tag, body).
fn fenced_blocks(response: &str) -> Vec<(String, String)> {
    let mut blocks = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in response.lines() {
        let trimmed = line.trim();
        match current.take() {
            None => {
                if let Some(tag) = trimmed.strip_prefix("```") {
                    current = Some((tag.trim().to_string(), String::new()));
                }
            }
            Some((tag, body)) if trimmed == "```" => blocks.push((tag, body)),
            Some((tag, mut body)) => {
                body.push_str(line);
                body.push('\n');
                current = Some((tag, body));
            }
        }
    }

    blocks
}

/// Last resort: the outermost `[ ... ]` span of the response.
fn embedded_array(response: &str) -> Option<serde_json::Value> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str =
        r#"{"text": "Capital of France?", "choices": ["Paris", "Rome"], "correct_index": 0, "difficulty": "easy"}"#;

    #[test]
    fn test_parse_raw_array() {
        let records = parse_question_batch(&format!("[{}]", RECORD)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Capital of France?");
        assert_eq!(records[0].difficulty.as_deref(), Some("easy"));
    }

    #[test]
    fn test_parse_json_fence_with_prose() {
        let response = format!(
            "Here are your questions:\n\n```json\n[{}, {}]\n```\n\nGood luck!",
            RECORD, RECORD
        );
        assert_eq!(parse_question_batch(&response).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_untagged_fence() {
        let response = format!("```\n[{}]\n```", RECORD);
        assert_eq!(parse_question_batch(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_questions_object() {
        let response = format!(r#"{{"questions": [{}]}}"#, RECORD);
        assert_eq!(parse_question_batch(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_embedded_array_without_fence() {
        let response = format!("Sure! [{}] Enjoy.", RECORD);
        assert_eq!(parse_question_batch(&response).unwrap().len(), 1);
    }

    #[test]
    fn test_garbled_response_is_error() {
        assert_eq!(
            parse_question_batch("I cannot help with that."),
            Err(ParseBatchError::NoJson)
        );
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        assert!(matches!(
            parse_question_batch(r#"{"foo": 1}"#),
            Err(ParseBatchError::Schema(_))
        ));
        assert!(matches!(
            parse_question_batch("42"),
            Err(ParseBatchError::Schema(_))
        ));
    }

    #[test]
    fn test_empty_array_parses_to_no_records() {
        assert!(parse_question_batch("[]").unwrap().is_empty());
    }
}
