use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::Error;
use crate::models::{
    Operation, RecognitionAudio, RecognitionConfig, RecognizeRequest, RecognizeResponse,
    Transcript,
};
use crate::speech::normalize::normalize_response;

const SPEECH_API_URL: &str = "https://speech.googleapis.com/v1";

/// Ceiling for one recognition operation, start to finish
pub const TRANSCRIBE_TIMEOUT_SECS: u64 = 900;

/// How often to poll the long-running operation
const POLL_INTERVAL_SECS: u64 = 5;

/// Configuration for the Speech-to-Text client
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// API key (from GOOGLE_API_KEY env var)
    pub api_key: String,
    /// Language of the recording
    pub language_code: String,
    /// Sample rate of the source audio in hertz. The 16 kHz default fits
    /// common video sources but not arbitrary inputs, so callers can override
    /// it rather than inherit a buried constant.
    pub sample_rate_hertz: u32,
    /// Encoding of the audio container
    pub encoding: String,
    /// Acoustic model, tuned for audio extracted from video
    pub model: String,
}

impl SpeechConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| Error::Config("GOOGLE_API_KEY environment variable not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Create with default recognition settings
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            language_code: "en-US".to_string(),
            sample_rate_hertz: 16000,
            encoding: "MP4".to_string(),
            model: "video".to_string(),
        }
    }
}

/// Speech-to-Text API client
pub struct SpeechClient {
    client: Client,
    config: SpeechConfig,
}

impl SpeechClient {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Transcribe a remotely stored recording into a normalized transcript.
    ///
    /// Starts a long-running recognition operation for the given `gs://` URI,
    /// polls until the backend reports completion, then normalizes the result.
    /// If the ceiling elapses first the call fails with a timeout; a partial
    /// transcript is never returned.
    pub async fn transcribe(&self, uri: &str) -> Result<Transcript, Error> {
        let operation = self.start_recognition(uri).await?;
        info!("Recognition operation {} started", operation.name);

        let response = with_ceiling(
            TRANSCRIBE_TIMEOUT_SECS,
            self.wait_for_operation(&operation.name),
        )
        .await?;

        normalize_response(&response)
    }

    /// Issue the `longrunningrecognize` request and return the pending operation
    async fn start_recognition(&self, uri: &str) -> Result<Operation, Error> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: self.config.encoding.clone(),
                sample_rate_hertz: self.config.sample_rate_hertz,
                language_code: self.config.language_code.clone(),
                enable_automatic_punctuation: true,
                enable_word_time_offsets: true,
                model: self.config.model.clone(),
            },
            audio: RecognitionAudio {
                uri: uri.to_string(),
            },
        };

        let response = self
            .client
            .post(format!("{}/speech:longrunningrecognize", SPEECH_API_URL))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("Failed to start recognition: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "Speech API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("Failed to parse operation: {}", e)))
    }

    /// Poll the operation until the backend reports it done
    async fn wait_for_operation(&self, name: &str) -> Result<RecognizeResponse, Error> {
        loop {
            let operation = self.get_operation(name).await?;

            if let Some(error) = operation.error {
                return Err(Error::Transcription(format!(
                    "Recognition backend error {}: {}",
                    error.code, error.message
                )));
            }

            if operation.done {
                return operation.response.ok_or_else(|| {
                    Error::Transcription("Operation completed without a response".to_string())
                });
            }

            debug!("Operation {} still running", name);
            tokio::time::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
        }
    }

    async fn get_operation(&self, name: &str) -> Result<Operation, Error> {
        let response = self
            .client
            .get(format!("{}/operations/{}", SPEECH_API_URL, name))
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("Failed to poll operation: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "Speech API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Transcription(format!("Failed to parse operation: {}", e)))
    }
}

/// Run a future under a fixed ceiling, mapping expiry to a timeout error.
async fn with_ceiling<T, F>(secs: u64, fut: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    match tokio::time::timeout(Duration::from_secs(secs), fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(secs)),
    }
}
