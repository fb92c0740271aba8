//! Disengagement detection — a single place to classify whether the
//! candidate wants to move off the current topic, so the phrase list can be
//! swapped without touching policy logic.

/// Coarse intent of a candidate turn with respect to the active topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Candidate signalled lack of knowledge or asked to move on.
    Disengaged,
    /// Anything else — keep probing.
    Continue,
}

/// Phrases that signal the candidate cannot or will not go deeper on the
/// current topic. Matched as lowercase substrings.
const DISENGAGEMENT_PHRASES: &[&str] = &[
    "don't know",
    "do not know",
    "no idea",
    "not sure",
    "don't have experience",
    "don't have any experience",
    "never used",
    "haven't used",
    "no experience",
    "don't know much",
    "just did",
    "basic structure",
    "same questions",
    "skip",
    "move on",
];

pub fn classify_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();
    if DISENGAGEMENT_PHRASES.iter().any(|p| lower.contains(p)) {
        Intent::Disengaged
    } else {
        Intent::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dont_know_is_disengaged() {
        assert_eq!(classify_intent("I don't know, honestly"), Intent::Disengaged);
    }

    #[test]
    fn test_skip_is_disengaged() {
        assert_eq!(classify_intent("can we skip this one?"), Intent::Disengaged);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify_intent("NO EXPERIENCE with that"), Intent::Disengaged);
    }

    #[test]
    fn test_substantive_answer_continues() {
        assert_eq!(
            classify_intent("I built the ingestion layer on top of Kafka"),
            Intent::Continue
        );
    }

    #[test]
    fn test_empty_input_continues() {
        assert_eq!(classify_intent(""), Intent::Continue);
    }
}
