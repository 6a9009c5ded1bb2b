//! OpenAI chat completions with JSON-schema structured output.

use async_trait::async_trait;
use factreel_core::CompletionRequest;
use factreel_error::{FactreelResult, HttpError, ProviderError, ProviderErrorKind};
use factreel_interface::CompletionService;
use factreel_rate_limit::retry_after_from_headers;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const PROVIDER: &str = "openai";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// OpenAI chat completions client.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `url` - Chat completions endpoint
    /// * `model` - Default model identifier (e.g., "gpt-4o-2024-08-06")
    pub fn new(
        api_key: impl Into<String>,
        url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        debug!(model = %model, "Creating new OpenAI completion client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            url: url.into(),
            model,
        }
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: request.model().as_deref().unwrap_or(&self.model),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system(),
                },
                ChatMessage {
                    role: "user",
                    content: request.user(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: request.schema_name(),
                    strict: true,
                    schema: request.schema(),
                },
            },
        }
    }
}

/// Pull the structured document out of a chat completions response body.
///
/// # Errors
///
/// - `ProviderErrorKind::Unhandled` if the model refused or returned no content
/// - `ProviderErrorKind::SchemaValidation` if the body is not a completions response
pub fn extract_completion_content(body: &str) -> FactreelResult<String> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::with_provider(
            PROVIDER,
            ProviderErrorKind::SchemaValidation(format!("Malformed completion response: {}", e)),
        )
    })?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| {
            ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::Unhandled("Completion returned no choices".to_string()),
            )
        })?;

    if let Some(refusal) = message.refusal {
        return Err(ProviderError::with_provider(
            PROVIDER,
            ProviderErrorKind::Unhandled(format!("Model refused: {}", refusal)),
        )
        .into());
    }

    message.content.ok_or_else(|| {
        ProviderError::with_provider(
            PROVIDER,
            ProviderErrorKind::Unhandled("Completion returned no content".to_string()),
        )
        .into()
    })
}

#[async_trait]
impl CompletionService for OpenAiCompletionClient {
    #[instrument(skip(self, request), fields(model = %self.model, schema = %request.schema_name()))]
    async fn complete(&self, request: &CompletionRequest) -> FactreelResult<String> {
        debug!("Sending request to OpenAI");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let retry_after = retry_after_from_headers(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read completion response: {}", e)))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            error!(body = %body, "OpenAI rate limited the completion");
            return Err(ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::RateLimited {
                    retry_after_secs: retry_after.map(|d| d.as_secs()),
                },
            )
            .into());
        }

        if !status.is_success() {
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::Unhandled(format!("HTTP {}: {}", status.as_u16(), body)),
            )
            .into());
        }

        let content = extract_completion_content(&body)?;
        debug!(content_len = content.len(), "Received completion");
        Ok(content)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factreel_error::FactreelErrorKind;

    fn provider_kind(err: &factreel_error::FactreelError) -> &ProviderErrorKind {
        match err.kind() {
            FactreelErrorKind::Provider(p) => &p.kind,
            other => panic!("expected provider error, got {other}"),
        }
    }

    #[test]
    fn test_extracts_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"script\":\"x\"}","refusal":null}}]}"#;
        assert_eq!(extract_completion_content(body).unwrap(), r#"{"script":"x"}"#);
    }

    #[test]
    fn test_refusal_is_unhandled() {
        let body = r#"{"choices":[{"message":{"content":null,"refusal":"I can't help with that."}}]}"#;
        let err = extract_completion_content(body).unwrap_err();
        assert!(matches!(provider_kind(&err), ProviderErrorKind::Unhandled(_)));
    }

    #[test]
    fn test_empty_choices() {
        let err = extract_completion_content(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(provider_kind(&err), ProviderErrorKind::Unhandled(_)));
    }

    #[test]
    fn test_garbage_body_is_schema_error() {
        let err = extract_completion_content("<html>").unwrap_err();
        assert!(matches!(
            provider_kind(&err),
            ProviderErrorKind::SchemaValidation(_)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let client = OpenAiCompletionClient::new("key", "http://localhost", "gpt-4o-2024-08-06");
        let request = CompletionRequest::builder()
            .system("sys")
            .user("usr")
            .schema_name("script_bundle")
            .schema(serde_json::json!({"type": "object"}))
            .build()
            .unwrap();

        let body = serde_json::to_value(client.build_body(&request)).unwrap();
        assert_eq!(body["model"], "gpt-4o-2024-08-06");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "usr");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(body["response_format"]["json_schema"]["name"], "script_bundle");
    }
}
