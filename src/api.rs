use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::transcript::Message;

/// The body POSTed to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

// Only `choices[0].message.content` is required. The other fields are
// diagnostics and stay untyped, so an odd value there never rejects a reply.
#[derive(Debug, Deserialize, Clone)]
struct Response {
    id: Option<serde_json::Value>,
    model: Option<serde_json::Value>,
    choices: Option<Vec<Choice>>,
    usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Clone)]
struct Choice {
    // Depends on the model. Ex: 'stop' | 'length' | 'content_filter' | 'tool_calls'
    finish_reason: Option<serde_json::Value>,
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize, Clone)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
struct ErrorResponseContainer {
    error: Option<ErrorResponse>,
}

#[derive(Debug, Deserialize, Clone)]
struct ErrorResponse {
    message: Option<String>,
}

/// Something that turns a transcript snapshot into the assistant's reply.
#[async_trait]
pub trait CompletionBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// `ApiClient` talks to an OpenAI compatible chat-completions endpoint.
///
/// Each call is a single POST whose full body is awaited before parsing.
/// There is no retry and no streaming: whatever happens on the one attempt
/// is reported back as a reply or a [`ChatError`].
pub struct ApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::configuration(format!("unable to build HTTP client: {}", e)))?;

        Ok(ApiClient {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for ApiClient {
    /// Sends the transcript snapshot and waits for the complete reply.
    ///
    /// # Returns
    /// - `Ok(text)` with the first choice's message content on a success status.
    /// - `ChatError::Api` on a non-success status, carrying the status code and the
    ///   endpoint's `error.message` when one could be read.
    /// - `ChatError::Parse` when a success body lacks `choices[0].message.content`.
    /// - `ChatError::Network` when the request never got a full answer.
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let started = Instant::now();
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received completion response"
        );

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        parse_reply(&body)
    }
}

/// Extracts the assistant text from a success body.
///
/// A missing `choices`, an empty list, or a first choice without
/// `message.content` is a malformed response, never an empty reply.
pub fn parse_reply(body: &str) -> Result<String> {
    let response: Response = serde_json::from_str(body)
        .map_err(|e| ChatError::parse(format!("body is not valid JSON: {}", e)))?;

    if let Some(usage) = &response.usage {
        debug!(
            id = %response.id.as_ref().unwrap_or(&serde_json::Value::Null),
            model = %response.model.as_ref().unwrap_or(&serde_json::Value::Null),
            usage = %usage,
            "token usage"
        );
    }

    let choice = response
        .choices
        .as_ref()
        .and_then(|choices| choices.first())
        .ok_or_else(|| ChatError::parse("response has no choices"))?;
    if let Some(reason) = &choice.finish_reason {
        debug!(finish_reason = %reason, "first choice finished");
    }

    choice
        .message
        .as_ref()
        .and_then(|message| message.content.clone())
        .ok_or_else(|| ChatError::parse("first choice has no message content"))
}

/// Builds the failure for a non-success status. Reading the error body is
/// best effort: anything unexpected falls back to the status description.
pub fn api_error(status: StatusCode, body: &str) -> ChatError {
    let message = serde_json::from_str::<ErrorResponseContainer>(body)
        .ok()
        .and_then(|container| container.error)
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    ChatError::Api {
        status: status.as_u16(),
        message,
    }
}
