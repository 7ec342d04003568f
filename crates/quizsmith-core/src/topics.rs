//! Key-topic extraction from learning-objective text.
//!
//! Used by the generation engine when the caller supplies no explicit
//! topics. The heuristic favors short noun-phrase-shaped fragments over
//! full sentences and degrades gracefully to generic fallback labels when
//! the objective text is unstructured.

/// Generic labels appended when the objective text yields too few topics.
pub const FALLBACK_TOPICS: [&str; 3] = ["Core Concepts", "Key Principles", "Practical Application"];

/// Maximum number of topics returned.
const MAX_TOPICS: usize = 5;

/// Minimum number of topics before fallbacks are appended.
const MIN_TOPICS: usize = 3;

/// Derive up to [`MAX_TOPICS`] topic labels from learning-objective text.
///
/// Splits the objectives on sentence-ending punctuation and line breaks and
/// keeps trimmed fragments whose word count is in [2, 5]. If fewer than
/// three candidates remain, fallback labels are appended until three are
/// present. Never returns an empty list.
///
/// `course_content` is part of the contract for future extension but unused
/// by the current heuristic.
pub fn extract_key_topics(_course_content: &str, learning_objectives: &str) -> Vec<String> {
    let mut topics: Vec<String> = learning_objectives
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|fragment| {
            let words = fragment.split_whitespace().count();
            (2..=5).contains(&words)
        })
        .map(str::to_string)
        .collect();

    for fallback in FALLBACK_TOPICS {
        if topics.len() >= MIN_TOPICS {
            break;
        }
        topics.push(fallback.to_string());
    }

    topics.truncate(MAX_TOPICS);
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_short_fragments_as_topics() {
        let objectives = "Understand ownership semantics. Apply borrow checking rules.\n\
                          Students will be able to explain the full derivation of lifetimes in generic code.";
        let topics = extract_key_topics("", objectives);
        assert!(topics.contains(&"Understand ownership semantics".to_string()));
        assert!(topics.contains(&"Apply borrow checking rules".to_string()));
        // The long sentence is not a usable label.
        assert!(!topics.iter().any(|t| t.contains("full derivation")));
    }

    #[test]
    fn unstructured_text_yields_exactly_the_fallbacks() {
        let topics = extract_key_topics("", "incomprehensible");
        assert_eq!(
            topics,
            vec!["Core Concepts", "Key Principles", "Practical Application"]
        );
    }

    #[test]
    fn empty_objectives_yield_fallbacks() {
        let topics = extract_key_topics("", "");
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0], "Core Concepts");
    }

    #[test]
    fn tops_up_to_three_without_discarding_candidates() {
        let topics = extract_key_topics("", "Memory safety guarantees.");
        assert_eq!(
            topics,
            vec!["Memory safety guarantees", "Core Concepts", "Key Principles"]
        );
    }

    #[test]
    fn caps_at_five_topics() {
        let objectives = "First topic here. Second topic here. Third topic here.\n\
                          Fourth topic here. Fifth topic here. Sixth topic here.";
        let topics = extract_key_topics("", objectives);
        assert_eq!(topics.len(), 5);
        assert_eq!(topics[0], "First topic here");
        assert_eq!(topics[4], "Fifth topic here");
    }

    #[test]
    fn splits_on_question_and_exclamation_marks() {
        let topics = extract_key_topics("", "What is recursion? Divide and conquer!");
        assert!(topics.contains(&"What is recursion".to_string()));
        assert!(topics.contains(&"Divide and conquer".to_string()));
    }
}
