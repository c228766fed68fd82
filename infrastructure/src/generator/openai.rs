//! Question generation over an OpenAI-compatible chat completions API.

use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use trivia_application::{GenerationError, GenerationRequest, QuestionGenerator};
use trivia_domain::core::string::truncate;
use trivia_domain::{QuizPromptTemplate, RawQuestion, parse_question_batch};

/// Longest slice of an error body kept in a [`GenerationError`].
const MAX_ERROR_BODY: usize = 300;

/// Generator backed by `POST {base_url}/v1/chat/completions`.
pub struct OpenAiQuestionGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiQuestionGenerator {
    /// Build from the `[generator.openai]` section.
    ///
    /// Fails with [`GenerationError::Configuration`] when no API key is
    /// configured or the HTTP client cannot be built.
    pub fn from_config(config: &FileOpenAiConfig) -> Result<Self, GenerationError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GenerationError::Configuration(format!(
                "no API key: set {} or generator.openai.api_key",
                config.api_key_env
            ))
        })?;

        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: QuizPromptTemplate::system().to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: QuizPromptTemplate::generate(
                        &request.category,
                        request.difficulty,
                        request.count,
                    ),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<RawQuestion>, GenerationError> {
        debug!(
            "Requesting {} {} questions about {} from {}",
            request.count, request.difficulty, request.category, self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(body.trim(), MAX_ERROR_BODY)
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Unparsable(e.to_string()))?;

        records_from_response(body)
    }
}

fn records_from_response(body: ChatResponse) -> Result<Vec<RawQuestion>, GenerationError> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| GenerationError::Unparsable("empty reply".to_string()))?;

    debug!("Generator reply: {}", truncate(&content, 200));
    parse_question_batch(&content).map_err(|e| GenerationError::Unparsable(e.to_string()))
}

fn map_reqwest_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::ConnectionError(e.to_string())
    } else {
        GenerationError::RequestFailed(e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_domain::Difficulty;

    fn config() -> FileOpenAiConfig {
        FileOpenAiConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://127.0.0.1:1/".to_string(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    fn reply(content: Option<&str>) -> ChatResponse {
        serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let config = FileOpenAiConfig {
            api_key_env: "TRIVIA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        let result = OpenAiQuestionGenerator::from_config(&config);
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let generator = OpenAiQuestionGenerator::from_config(&config()).unwrap();
        assert_eq!(generator.endpoint(), "http://127.0.0.1:1/v1/chat/completions");
    }

    #[test]
    fn test_request_body_carries_prompt() {
        let generator = OpenAiQuestionGenerator::from_config(&config()).unwrap();
        let request = GenerationRequest::new("Anime", Difficulty::Medium, 3);
        let body = serde_json::to_value(generator.build_request(&request)).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        let prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("\"Anime\""));
        assert!(prompt.contains("Write 3 short"));
    }

    #[test]
    fn test_records_from_fenced_reply() {
        let content = "Here you go:\n```json\n[{\"text\": \"2+2?\", \"choices\": [\"3\", \"4\"], \"correct_index\": 1}]\n```";
        let records = records_from_response(reply(Some(content))).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "2+2?");
        assert_eq!(records[0].correct_index, Some(1));
    }

    #[test]
    fn test_garbled_reply_is_unparsable() {
        let result = records_from_response(reply(Some("I cannot help with that.")));
        assert!(matches!(result, Err(GenerationError::Unparsable(_))));
    }

    #[test]
    fn test_empty_reply_is_unparsable() {
        assert!(matches!(
            records_from_response(reply(None)),
            Err(GenerationError::Unparsable(_))
        ));
        let no_choices: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            records_from_response(no_choices),
            Err(GenerationError::Unparsable(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        let generator = OpenAiQuestionGenerator::from_config(&config()).unwrap();
        let request = GenerationRequest::new("History", Difficulty::Easy, 1);
        let result = generator.generate(&request).await;
        assert!(matches!(
            result,
            Err(GenerationError::ConnectionError(_))
                | Err(GenerationError::RequestFailed(_))
                | Err(GenerationError::Timeout)
        ));
    }
}
