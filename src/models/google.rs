use serde::{Deserialize, Serialize};

/// Recognition request body for `speech:longrunningrecognize`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeRequest {
    pub config: RecognitionConfig,
    pub audio: RecognitionAudio,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub enable_automatic_punctuation: bool,
    pub enable_word_time_offsets: bool,
    pub model: String,
}

/// Reference to audio already uploaded where the backend can read it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionAudio {
    pub uri: String,
}

/// Long-running operation envelope returned by the start call and by polling
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationError>,
    #[serde(default)]
    pub response: Option<RecognizeResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Recognition results carried in a completed operation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

/// One recognition hypothesis; the first in the list is the most likely
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub words: Vec<WordInfo>,
}

/// Word with time offsets. Times arrive as protobuf Duration JSON strings
/// such as "1.400s".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInfo {
    pub word: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl WordInfo {
    /// Start offset in seconds, `None` if the wire value is malformed
    pub fn start_secs(&self) -> Option<f64> {
        parse_duration_secs(&self.start_time)
    }

    /// End offset in seconds, `None` if the wire value is malformed
    pub fn end_secs(&self) -> Option<f64> {
        parse_duration_secs(&self.end_time)
    }
}

/// Parse a protobuf Duration JSON string ("3.5s", "0s") into seconds.
pub fn parse_duration_secs(value: &str) -> Option<f64> {
    let seconds = value.strip_suffix('s')?;
    seconds.parse::<f64>().ok().filter(|s| s.is_finite())
}
