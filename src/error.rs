use thiserror::Error;

/// Pipeline errors. All variants are terminal for the call that produced them;
/// retries and backend fallback are the caller's decision.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported LLM provider: {0}")]
    UnsupportedBackend(String),

    #[error("Transcription did not complete within {0} seconds")]
    Timeout(u64),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Clip generation failed: {0}")]
    Generation(String),
}
