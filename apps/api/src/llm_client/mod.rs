/// LLM Client: the single point of entry for every model call in ResumeMatch.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through this module.
///
/// The provider is an explicit value resolved from configuration at startup and
/// owned by the client; nothing here is mutated after construction.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const OPENAI_MODEL: &str = "gpt-4.1-nano";
pub const GROQ_MODEL: &str = "openai/gpt-oss-20b";

const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A configured extraction provider and its credentials.
#[derive(Clone, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic { api_key: String },
    OpenAi { api_key: String },
    Groq { api_key: String },
}

impl LlmProvider {
    /// Picks a provider from the available keys.
    /// Priority: Anthropic > OpenAI > Groq.
    pub fn select(
        anthropic_key: Option<String>,
        openai_key: Option<String>,
        groq_key: Option<String>,
    ) -> Option<Self> {
        anthropic_key
            .map(|api_key| LlmProvider::Anthropic { api_key })
            .or_else(|| openai_key.map(|api_key| LlmProvider::OpenAi { api_key }))
            .or_else(|| groq_key.map(|api_key| LlmProvider::Groq { api_key }))
    }

    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic { .. } => "anthropic",
            LlmProvider::OpenAi { .. } => "openai",
            LlmProvider::Groq { .. } => "groq",
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic { .. } => ANTHROPIC_MODEL,
            LlmProvider::OpenAi { .. } => OPENAI_MODEL,
            LlmProvider::Groq { .. } => GROQ_MODEL,
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("name", &self.name())
            .field("model", &self.model())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single LLM client used by every service in ResumeMatch.
/// Wraps the provider's HTTP API with retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    provider: LlmProvider,
}

impl LlmClient {
    pub fn new(provider: LlmProvider) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            provider,
        })
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Calls the provider and returns the text of the first completion.
    /// Makes up to `MAX_RETRIES` attempts on transport errors, 429 and 5xx,
    /// sleeping 1s then 2s between them. A final 429 surfaces as `RateLimited`.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.send(prompt, system).await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("{} API returned {}: {}", self.provider.name(), status, body);
                last_error = Some(retryable_error(status.as_u16(), body));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return self.read_text(response).await;
        }

        // Every attempt records its failure before continuing.
        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.call(prompt, system).await?;
        serde_json::from_str(extract_json_object(&text)).map_err(LlmError::Parse)
    }

    async fn send(&self, prompt: &str, system: &str) -> Result<reqwest::Response, reqwest::Error> {
        match &self.provider {
            LlmProvider::Anthropic { api_key } => {
                let body = AnthropicRequest {
                    model: ANTHROPIC_MODEL,
                    max_tokens: MAX_TOKENS,
                    system,
                    messages: vec![Message {
                        role: "user",
                        content: prompt,
                    }],
                };
                self.client
                    .post(ANTHROPIC_API_URL)
                    .header("x-api-key", api_key)
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .header("content-type", "application/json")
                    .json(&body)
                    .send()
                    .await
            }
            LlmProvider::OpenAi { api_key } | LlmProvider::Groq { api_key } => {
                let url = if matches!(self.provider, LlmProvider::Groq { .. }) {
                    GROQ_API_URL
                } else {
                    OPENAI_API_URL
                };
                let body = ChatRequest {
                    model: self.provider.model(),
                    max_tokens: MAX_TOKENS,
                    temperature: 0.0,
                    messages: vec![
                        Message {
                            role: "system",
                            content: system,
                        },
                        Message {
                            role: "user",
                            content: prompt,
                        },
                    ],
                };
                self.client
                    .post(url)
                    .bearer_auth(api_key)
                    .json(&body)
                    .send()
                    .await
            }
        }
    }

    async fn read_text(&self, response: reqwest::Response) -> Result<String, LlmError> {
        match self.provider {
            LlmProvider::Anthropic { .. } => {
                let parsed: AnthropicResponse = response.json().await?;
                debug!(
                    "LLM call succeeded: provider=anthropic, input_tokens={}, output_tokens={}",
                    parsed.usage.input_tokens, parsed.usage.output_tokens
                );
                parsed
                    .content
                    .into_iter()
                    .find(|b| b.block_type == "text")
                    .and_then(|b| b.text)
                    .ok_or(LlmError::EmptyContent)
            }
            LlmProvider::OpenAi { .. } | LlmProvider::Groq { .. } => {
                let parsed: ChatResponse = response.json().await?;
                if let Some(usage) = &parsed.usage {
                    debug!(
                        "LLM call succeeded: provider={}, input_tokens={}, output_tokens={}",
                        self.provider.name(),
                        usage.prompt_tokens,
                        usage.completion_tokens
                    );
                }
                parsed
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
                    .filter(|text| !text.trim().is_empty())
                    .ok_or(LlmError::EmptyContent)
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based): 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1u64 << attempt.saturating_sub(1)))
}

/// Error recorded for a retryable status once the attempt is spent.
fn retryable_error(status: u16, body: String) -> LlmError {
    if status == 429 {
        LlmError::RateLimited {
            attempts: MAX_RETRIES,
        }
    } else {
        LlmError::Api {
            status,
            message: body,
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Narrows model output to the outermost `{ ... }` object, dropping fences and
/// any prose the model wrapped around it.
fn extract_json_object(text: &str) -> &str {
    let text = strip_json_fences(text);
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}
