use serde::{Deserialize, Serialize};

/// A single recognized token with word-level timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The recognized text - immutable once produced by the backend
    pub word: String,
    /// Start timestamp in seconds (inclusive)
    pub start: f64,
    /// End timestamp in seconds (inclusive, >= start)
    pub end: f64,
}

/// One recognized utterance span with its own text and word timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Text of this utterance
    pub text: String,
    /// Words in order, may be empty
    pub words: Vec<Word>,
    /// Start in seconds, taken from the first word. `None` when there are no
    /// words; serialized as `null`, never coerced to 0.0 (a real timestamp).
    pub start: Option<f64>,
    /// End in seconds, taken from the last word. `None` when there are no words.
    pub end: Option<f64>,
}

impl Segment {
    /// Build a segment, deriving start/end from the first and last word.
    pub fn from_words(text: String, words: Vec<Word>) -> Self {
        let start = words.first().map(|w| w.start);
        let end = words.last().map(|w| w.end);
        Self {
            text,
            words,
            start,
            end,
        }
    }

    /// Number of words in this segment
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// The normalized transcript passed downstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Space-joined concatenation of all segment texts, in segment order
    pub text: String,
    /// Segments in recognition result order
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Build a transcript from segments, joining their texts in order.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, segments }
    }

    /// Total number of words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.word_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(word: &str, start: f64, end: f64) -> Word {
        Word {
            word: word.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_segment_derives_bounds_from_words() {
        let segment = Segment::from_words(
            "hi there".to_string(),
            vec![word("hi", 0.0, 0.2), word("there", 0.2, 0.6)],
        );

        assert_eq!(segment.start, Some(0.0));
        assert_eq!(segment.end, Some(0.6));
        assert_eq!(segment.word_count(), 2);
    }

    #[test]
    fn test_empty_segment_has_absent_bounds() {
        let segment = Segment::from_words("".to_string(), vec![]);

        assert_eq!(segment.start, None);
        assert_eq!(segment.end, None);
    }

    #[test]
    fn test_empty_segment_serializes_bounds_as_null() {
        let segment = Segment::from_words("".to_string(), vec![]);
        let json = serde_json::to_value(&segment).unwrap();

        // The keys must be present and explicitly null, not omitted and not 0
        assert_eq!(json["start"], serde_json::Value::Null);
        assert_eq!(json["end"], serde_json::Value::Null);
    }

    #[test]
    fn test_zero_start_is_preserved() {
        let segment = Segment::from_words("hi".to_string(), vec![word("hi", 0.0, 0.2)]);
        let json = serde_json::to_value(&segment).unwrap();

        assert_eq!(json["start"], serde_json::json!(0.0));
    }

    #[test]
    fn test_transcript_joins_segment_texts() {
        let transcript = Transcript::from_segments(vec![
            Segment::from_words(
                "hi there".to_string(),
                vec![word("hi", 0.0, 0.2), word("there", 0.2, 0.6)],
            ),
            Segment::from_words("bye".to_string(), vec![word("bye", 1.0, 1.3)]),
        ]);

        assert_eq!(transcript.text, "hi there bye");
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.word_count(), 3);
    }

    #[test]
    fn test_empty_transcript_has_empty_text() {
        let transcript = Transcript::from_segments(vec![]);

        assert_eq!(transcript.text, "");
        assert!(transcript.segments.is_empty());
    }
}
