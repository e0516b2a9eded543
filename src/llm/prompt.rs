/// Fixed instruction preamble for clip suggestion.
///
/// The clip count and duration caps live here and only here; the backends are
/// trusted to honor them and nothing downstream re-checks the model's answer.
pub const CLIP_INSTRUCTIONS: &str = "Analyze the following transcript and suggest up to 5 clips. \
Each clip should be a maximum of 60 seconds. Combine cuts if necessary. \
Respond with a JSON array of objects, where each object has 'start', 'end', and 'title' keys. \
Transcript: ";

/// Build the prompt for a transcript. Deterministic: the same transcript text
/// always produces the same bytes, and every backend receives the identical
/// prompt - only transport and model identity differ between providers.
pub fn build_prompt(transcript_text: &str) -> String {
    format!("{}{}", CLIP_INSTRUCTIONS, transcript_text)
}
