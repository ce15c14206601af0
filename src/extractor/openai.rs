//! OpenAI chat-completions extractor

use crate::config::ExtractorConfig;
use crate::extractor::{render_prompt, IssueExtractor, Strictness};
use crate::SweepError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a language quality control expert.";

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4o")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`IssueExtractor`] backed by an OpenAI-compatible chat-completions API
#[derive(Clone)]
pub struct OpenAiExtractor {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_input_chars: usize,
}

impl std::fmt::Debug for OpenAiExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiExtractor")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiExtractor {
    /// Creates an extractor; a blank API key is a configuration error
    pub fn new(api_key: impl Into<String>, config: &ExtractorConfig) -> Result<Self, SweepError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SweepError::MissingApiKey);
        }

        Ok(Self {
            http_client: Client::builder().build()?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_input_chars: config.max_input_chars,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one chat completion and returns the first choice's content
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<String, SweepError> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SweepError::Extraction(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponseRaw = response.json().await?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| SweepError::Extraction("No choices in response".to_string()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion"
        );

        Ok(content)
    }
}

#[async_trait]
impl IssueExtractor for OpenAiExtractor {
    async fn extract_issue(
        &self,
        text: &str,
        prompt_template: &str,
        strictness: Strictness,
    ) -> String {
        let prompt = render_prompt(prompt_template, text, self.max_input_chars, strictness);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)],
            temperature: Some(self.temperature),
        };

        match self.chat_completion(&request).await {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "Issue extraction failed");
                String::new()
            }
        }
    }
}
