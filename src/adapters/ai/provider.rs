use crate::domain::ports::TextService;
use crate::utils::error::{Result, SpinnerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const CONNECTION_TEST_PROMPT: &str =
    "Say \"Hello, AI connection test successful!\" in exactly those words.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    #[cfg_attr(feature = "cli", value(name = "openai"))]
    OpenAi,
}

impl AiProvider {
    /// `AI_PROVIDER=openai` selects OpenAI, anything else Gemini.
    pub fn from_env() -> Self {
        match std::env::var("AI_PROVIDER") {
            Ok(value) => Self::from_name(&value),
            Err(_) => AiProvider::Gemini,
        }
    }

    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("openai") {
            AiProvider::OpenAi
        } else {
            AiProvider::Gemini
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini",
            AiProvider::OpenAi => "openai",
        }
    }

    pub fn api_key_env(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "GOOGLE_GEMINI_API_KEY",
            AiProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "https://generativelanguage.googleapis.com",
            AiProvider::OpenAi => "https://api.openai.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini-2.0-flash-exp",
            AiProvider::OpenAi => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Gemini generateContent 格式
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

// OpenAI chat completions 格式
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Calls Gemini or OpenAI over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTextService {
    client: Client,
    provider: AiProvider,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl HttpTextService {
    pub fn new(provider: AiProvider, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            provider,
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_string(),
            model: provider.default_model().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Reads the API key for `provider` (or `AI_PROVIDER`) from the environment.
    pub fn from_env(provider: Option<AiProvider>) -> Result<Self> {
        let provider = provider.unwrap_or_else(AiProvider::from_env);
        let key_env = provider.api_key_env();
        match std::env::var(key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(provider, key)),
            _ => Err(SpinnerError::MissingConfigError {
                field: key_env.to_string(),
            }),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn provider_error(&self, response: reqwest::Response) -> SpinnerError {
        let status = response.status();
        let message = response
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Unknown error".to_string());
        tracing::error!("{} API error ({}): {}", self.provider, status, message);
        SpinnerError::AiProviderError {
            provider: self.provider.to_string(),
            status: Some(status.as_u16()),
            message,
        }
    }

    async fn call_gemini(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.provider_error(response).await);
        }

        let body: GeminiResponse = response.json().await?;
        Ok(body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .unwrap_or_default())
    }

    async fn call_openai(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
            max_tokens: 1000,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.provider_error(response).await);
        }

        let body: ChatResponse = response.json().await?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl TextService for HttpTextService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Using AI provider: {} ({})", self.provider, self.model);
        match self.provider {
            AiProvider::Gemini => self.call_gemini(prompt).await,
            AiProvider::OpenAi => self.call_openai(prompt).await,
        }
    }

    fn provider_name(&self) -> &str {
        self.provider.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub success: bool,
    pub message: String,
    pub provider: String,
}

/// Sends a fixed prompt and checks the echo.
pub async fn test_connection(service: &dyn TextService) -> ConnectionReport {
    let provider = service.provider_name().to_uppercase();
    match service.complete(CONNECTION_TEST_PROMPT).await {
        Ok(reply) => {
            let success = reply
                .to_lowercase()
                .contains("ai connection test successful");
            let message = if success {
                format!("{} API connected successfully", provider)
            } else {
                format!("{} API response unexpected: {}", provider, reply)
            };
            ConnectionReport {
                success,
                message,
                provider: service.provider_name().to_string(),
            }
        }
        Err(e) => ConnectionReport {
            success: false,
            message: format!("{} API connection failed: {}", provider, e),
            provider: service.provider_name().to_string(),
        },
    }
}
