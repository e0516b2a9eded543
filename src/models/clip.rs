use serde::{Deserialize, Serialize};

/// A highlight interval proposed by the generation backend.
///
/// The prompt instructs the model to keep clips under 60 seconds, emit at most
/// five, and merge adjacent cuts, but nothing in the pipeline enforces that:
/// the analyze path passes the model's text through verbatim and parsing is the
/// consumer's move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSuggestion {
    /// Start of the clip in seconds
    pub start: f64,
    /// End of the clip in seconds
    pub end: f64,
    /// Short title for the clip
    pub title: String,
}

impl ClipSuggestion {
    /// Duration of this clip in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}

/// Parse a backend's textual answer into clip suggestions.
///
/// Models frequently wrap the array in a markdown code fence even when told
/// not to, so fences are stripped before parsing.
pub fn parse_clip_suggestions(text: &str) -> Result<Vec<ClipSuggestion>, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
