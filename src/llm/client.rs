use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Error;
use crate::llm::build_prompt;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model for the gemini provider, overridable via LLM_MODEL
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// The groq provider always uses this model
pub const GROQ_MODEL: &str = "llama3-8b-8192";

/// Ceiling for one generation request
const GENERATE_TIMEOUT_SECS: u64 = 600;

/// Snapshot of the generation configuration, read from the environment once at
/// process start and threaded through explicitly.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider tag ("gemini" or "groq", from LLM_PROVIDER)
    pub provider: String,
    /// Model for the gemini provider (from LLM_MODEL)
    pub model: String,
    /// API key for the gemini provider (from GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
    /// API key for the groq provider (from GROQ_API_KEY)
    pub groq_api_key: Option<String>,
}

impl LlmConfig {
    /// Read the configuration from environment variables.
    ///
    /// Never fails: a missing credential only matters for the provider that is
    /// actually selected, and is reported when the backend is built.
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| GEMINI_DEFAULT_MODEL.to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
        }
    }
}

/// A generation backend: given a prompt, return the model's textual response.
///
/// The two providers share no object model beyond that contract, so they are
/// variants of one enum rather than implementations of a client trait.
pub enum LlmBackend {
    Gemini(GeminiClient),
    Groq(GroqClient),
}

impl LlmBackend {
    /// Select and build a backend from the configuration.
    ///
    /// The provider tag is checked first, so an unknown tag fails the same way
    /// whether or not any credential is present. A recognized provider with a
    /// missing credential fails before any client exists or any network call
    /// is attempted.
    pub fn from_config(config: &LlmConfig) -> Result<Self, Error> {
        match config.provider.as_str() {
            "gemini" => {
                let api_key = config.gemini_api_key.clone().ok_or_else(|| {
                    Error::Config("GEMINI_API_KEY environment variable not set".to_string())
                })?;
                Ok(Self::Gemini(GeminiClient::new(api_key, config.model.clone())?))
            }
            "groq" => {
                let api_key = config.groq_api_key.clone().ok_or_else(|| {
                    Error::Config("GROQ_API_KEY environment variable not set".to_string())
                })?;
                Ok(Self::Groq(GroqClient::new(api_key)))
            }
            other => Err(Error::UnsupportedBackend(other.to_string())),
        }
    }

    /// Provider tag of this backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini(_) => "gemini",
            Self::Groq(_) => "groq",
        }
    }

    /// Ask the backend for clip suggestions from transcript text.
    ///
    /// Returns the model's raw textual answer, expected but not guaranteed to
    /// be a JSON array of `{start, end, title}` objects. Nothing here parses,
    /// clamps, or repairs the output, so a malformed answer surfaces wherever
    /// the caller chooses to interpret it.
    pub async fn suggest_clips(&self, transcript_text: &str) -> Result<String, Error> {
        let prompt = build_prompt(transcript_text);
        info!("Requesting clip suggestions from {} backend", self.name());

        match self {
            Self::Gemini(client) => client.generate(&prompt).await,
            Self::Groq(client) => client.chat(&prompt).await,
        }
    }
}

/// Client for the Gemini generateContent API
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Single-shot generation call
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                GEMINI_API_URL, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Failed to send request to Gemini: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Gemini API error: {} - {}",
                status, body
            )));
        }

        let response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse Gemini response: {}", e)))?;

        Self::extract_text(&response)
    }

    fn extract_text(response: &GeminiResponse) -> Result<String, Error> {
        response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| Error::Generation("No text content in Gemini response".to_string()))
    }
}

/// Client for the Groq chat completions API
pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Chat completion with a single user turn carrying the prompt
    pub async fn chat(&self, prompt: &str) -> Result<String, Error> {
        let request = ChatCompletionRequest {
            model: GROQ_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Failed to send request to Groq: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Groq API error: {} - {}",
                status, body
            )));
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse Groq response: {}", e)))?;

        Self::extract_text(&response)
    }

    fn extract_text(response: &ChatCompletionResponse) -> Result<String, Error> {
        response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| Error::Generation("No choices in Groq response".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> LlmConfig {
        LlmConfig {
            provider: "gemini".to_string(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
            gemini_api_key: Some("gemini-key".to_string()),
            groq_api_key: Some("groq-key".to_string()),
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected_despite_credentials() {
        let config = LlmConfig {
            provider: "claude".to_string(),
            ..config_with_keys()
        };

        match LlmBackend::from_config(&config) {
            Err(Error::UnsupportedBackend(tag)) => assert_eq!(tag, "claude"),
            Err(other) => panic!("Expected unsupported backend, got {:?}", other),
            Ok(_) => panic!("Expected unsupported backend, got a backend"),
        }
    }

    #[test]
    fn test_gemini_without_key_fails_before_any_client_exists() {
        let config = LlmConfig {
            gemini_api_key: None,
            ..config_with_keys()
        };

        match LlmBackend::from_config(&config) {
            Err(Error::Config(message)) => assert!(message.contains("GEMINI_API_KEY")),
            Err(other) => panic!("Expected config error, got {:?}", other),
            Ok(_) => panic!("Expected config error, got a backend"),
        }
    }

    #[test]
    fn test_groq_without_key_fails_before_any_client_exists() {
        let config = LlmConfig {
            provider: "groq".to_string(),
            groq_api_key: None,
            ..config_with_keys()
        };

        match LlmBackend::from_config(&config) {
            Err(Error::Config(message)) => assert!(message.contains("GROQ_API_KEY")),
            Err(other) => panic!("Expected config error, got {:?}", other),
            Ok(_) => panic!("Expected config error, got a backend"),
        }
    }

    #[test]
    fn test_provider_selection() {
        let gemini = LlmBackend::from_config(&config_with_keys()).unwrap();
        assert_eq!(gemini.name(), "gemini");

        let groq = LlmBackend::from_config(&LlmConfig {
            provider: "groq".to_string(),
            ..config_with_keys()
        })
        .unwrap();
        assert_eq!(groq.name(), "groq");
    }

    #[test]
    fn test_gemini_request_serialization() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "suggest clips".to_string(),
                }],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "suggest clips");
    }

    #[test]
    fn test_gemini_response_extraction() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "[{\"start\": 0, \"end\": 30, \"title\": \"Intro\"}]"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let text = GeminiClient::extract_text(&response).unwrap();

        assert!(text.contains("Intro"));
    }

    #[test]
    fn test_gemini_empty_response_is_an_error() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();

        assert!(matches!(
            GeminiClient::extract_text(&response),
            Err(Error::Generation(_))
        ));
    }

    #[test]
    fn test_groq_request_serialization() {
        let request = ChatCompletionRequest {
            model: GROQ_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "suggest clips".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], GROQ_MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "suggest clips");
    }

    #[test]
    fn test_groq_response_extraction() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "[]"},
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        let text = GroqClient::extract_text(&response).unwrap();

        assert_eq!(text, "[]");
    }
}
