//! Oracle client implementations for Ollama and OpenAI endpoints.

use crate::oracle::{Message, Oracle, OracleError, OracleStream, Role};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Oracle provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleProvider {
    /// Local Ollama-style chat endpoint.
    Ollama,
    /// OpenAI (GPT models).
    OpenAi,
}

/// Client for a local Ollama-style chat endpoint.
///
/// Replies arrive as newline-delimited JSON chunks, each carrying a
/// message fragment and a `done` flag.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatChunk {
    #[serde(default)]
    message: OllamaChunkMessage,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Default, Deserialize)]
struct OllamaChunkMessage {
    #[serde(default)]
    content: String,
}

impl OllamaClient {
    /// Creates a new client for the given endpoint and model.
    #[instrument(skip(base_url, model))]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let model = model.into();
        info!(%base_url, %model, "Creating Ollama client");
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Oracle for OllamaClient {
    #[instrument(skip(self, messages), fields(model = %self.model, num_messages = messages.len()))]
    async fn stream(&self, messages: Vec<Message>) -> Result<OracleStream, OracleError> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(%url, "Sending chat request");

        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages,
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Ollama request failed");
                OracleError::new(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Ollama API error");
            return Err(OracleError::new(format!("Ollama API error {}: {}", status, body)));
        }

        debug!("Streaming chat response");
        let stream = try_stream! {
            let mut response = response;
            let mut buffer = String::new();
            let mut done = false;
            while !done {
                let bytes = response
                    .chunk()
                    .await
                    .map_err(|e| OracleError::new(format!("stream error: {}", e)))?;
                let Some(bytes) = bytes else { break };
                let text = std::str::from_utf8(&bytes)
                    .map_err(|e| OracleError::new(format!("invalid UTF-8 in stream: {}", e)))?;
                buffer.push_str(text);

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..newline + 1);
                    if line.is_empty() {
                        continue;
                    }
                    let chunk: OllamaChatChunk = serde_json::from_str(&line)
                        .map_err(|e| OracleError::new(format!("failed to parse chunk: {}", e)))?;
                    if chunk.done {
                        done = true;
                    }
                    yield chunk.message.content;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// Client for the OpenAI chat-completion API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    model: String,
    max_tokens: u32,
    client: OpenAIClient<OpenAIConfig>,
}

impl OpenAiClient {
    /// Creates a new client with the given API key, model, and token cap.
    #[instrument(skip(api_key, model), fields(model = %model))]
    pub fn new(
        api_key: String,
        model: impl Into<String> + std::fmt::Display,
        max_tokens: u32,
    ) -> Self {
        info!("Creating OpenAI client");
        Self {
            model: model.into(),
            max_tokens,
            client: OpenAIClient::with_config(OpenAIConfig::new().with_api_key(api_key)),
        }
    }
}

fn to_openai_message(message: Message) -> Result<ChatCompletionRequestMessage, OracleError> {
    match message.role {
        Role::System => Ok(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content)
                .build()
                .map_err(|e| OracleError::new(format!("Failed to build system message: {}", e)))?,
        )),
        Role::User => Ok(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(message.content)
                .build()
                .map_err(|e| OracleError::new(format!("Failed to build user message: {}", e)))?,
        )),
        Role::Assistant => Ok(ChatCompletionRequestMessage::Assistant(
            ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content)
                .build()
                .map_err(|e| OracleError::new(format!("Failed to build assistant message: {}", e)))?,
        )),
    }
}

#[async_trait]
impl Oracle for OpenAiClient {
    #[instrument(skip(self, messages), fields(model = %self.model, num_messages = messages.len()))]
    async fn stream(&self, messages: Vec<Message>) -> Result<OracleStream, OracleError> {
        debug!("Building chat completion request");
        let messages = messages
            .into_iter()
            .map(to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build request");
                OracleError::new(format!("Failed to build request: {}", e))
            })?;

        debug!("Sending streaming request to OpenAI");
        let stream = self.client.chat().create_stream(request).await.map_err(|e| {
            error!(error = ?e, "OpenAI API error");
            OracleError::new(format!("OpenAI API error: {}", e))
        })?;

        let fragments = stream.map(|item| match item {
            Ok(chunk) => Ok(chunk
                .choices
                .first()
                .and_then(|choice| choice.delta.content.clone())
                .unwrap_or_default()),
            Err(e) => Err(OracleError::new(format!("OpenAI stream error: {}", e))),
        });

        Ok(Box::pin(fragments))
    }
}
