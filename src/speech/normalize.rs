use crate::error::Error;
use crate::models::{RecognizeResponse, Segment, Transcript, Word};

/// Reshape a recognition response into the provider-independent transcript.
///
/// For each result only the first-ranked alternative is kept; lower-confidence
/// alternatives are discarded. Words are copied verbatim and segment bounds
/// derive from the first and last word, so a result with no words yields a
/// segment with absent bounds. Result order is preserved, which is
/// chronological for single-channel audio.
pub fn normalize_response(response: &RecognizeResponse) -> Result<Transcript, Error> {
    let mut segments = Vec::with_capacity(response.results.len());

    for result in &response.results {
        let Some(alternative) = result.alternatives.first() else {
            continue;
        };

        let mut words = Vec::with_capacity(alternative.words.len());
        for info in &alternative.words {
            let start = info.start_secs().ok_or_else(|| {
                Error::Transcription(format!(
                    "Malformed start time {:?} for word {:?}",
                    info.start_time, info.word
                ))
            })?;
            let end = info.end_secs().ok_or_else(|| {
                Error::Transcription(format!(
                    "Malformed end time {:?} for word {:?}",
                    info.end_time, info.word
                ))
            })?;
            words.push(Word {
                word: info.word.clone(),
                start,
                end,
            });
        }

        segments.push(Segment::from_words(alternative.transcript.clone(), words));
    }

    Ok(Transcript::from_segments(segments))
}
