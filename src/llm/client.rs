use super::prompt::{parse_ranked_list, user_prompt, SYSTEM_PROMPT};
use super::DiseaseRanker;
use crate::config::LlmConfig;
use crate::error::{ElbenchError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Request body for the chat completions endpoint
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response body from the chat completions endpoint
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Failure of one HTTP attempt, split by whether trying again can help.
enum Attempt {
    Retryable(ElbenchError),
    Fatal(ElbenchError),
}

/// OpenAI-compatible chat completions client
///
/// Sends one system + user exchange per case and parses the numbered list in
/// the reply. Rate limits (429) and server errors (5xx) are retried with
/// exponential backoff.
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_retries: usize,
    retry_delay: Duration,
}

impl OpenAiChatClient {
    /// Create a client from the `[llm]` config section and an API key.
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ElbenchError::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Override the initial backoff delay (doubles after every retry).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the raw reply text, retrying transient failures.
    pub async fn complete(&self, user: &str) -> Result<String> {
        let start = Instant::now();
        let mut attempt = 0;
        let mut delay = self.retry_delay;

        loop {
            match self.complete_once(user).await {
                Ok(text) => {
                    log::debug!(
                        "Chat completion took {:?} (attempt {})",
                        start.elapsed(),
                        attempt + 1
                    );
                    return Ok(text);
                }
                Err(Attempt::Retryable(e)) if attempt < self.max_retries => {
                    log::warn!("Retry {}/{} after error: {}", attempt + 1, self.max_retries, e);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(Attempt::Retryable(e)) | Err(Attempt::Fatal(e)) => return Err(e),
            }
        }
    }

    async fn complete_once(&self, user: &str) -> std::result::Result<String, Attempt> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let err = ElbenchError::Llm(format!("Network error: {}", e));
                if e.is_timeout() || e.is_connect() {
                    Attempt::Retryable(err)
                } else {
                    Attempt::Fatal(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            let err = ElbenchError::Llm(format!("Chat API error {}: {}", status, body));
            return Err(if is_retryable(status) {
                Attempt::Retryable(err)
            } else {
                Attempt::Fatal(err)
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            Attempt::Fatal(ElbenchError::Llm(format!("Failed to parse response: {}", e)))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                Attempt::Fatal(ElbenchError::Llm("Empty response from chat API".to_string()))
            })
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl DiseaseRanker for OpenAiChatClient {
    async fn suggest_diseases(&self, phenotypes: &str, k: usize) -> Result<Vec<String>> {
        let reply = self.complete(&user_prompt(phenotypes, k)).await?;
        Ok(parse_ranked_list(&reply, k))
    }
}
