pub mod error;
pub mod llm;
pub mod models;
pub mod speech;

pub use error::Error;
pub use llm::{build_prompt, GeminiClient, GroqClient, LlmBackend, LlmConfig};
pub use models::{
    parse_clip_suggestions, ClipSuggestion, RecognizeResponse, Segment, Transcript, Word,
};
pub use speech::{normalize_response, SpeechClient, SpeechConfig};
