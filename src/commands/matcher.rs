use super::table::Action;

/// Returns true if any phrase is a case-insensitive substring of the transcript.
pub fn matches(transcript: &str, phrases: &[&str]) -> bool {
    let transcript = transcript.to_lowercase();
    phrases
        .iter()
        .any(|phrase| transcript.contains(phrase.to_lowercase().as_str()))
}

/// Resolve a transcript to the first matching action in table order.
pub fn resolve(transcript: &str) -> Option<Action> {
    let normalized = transcript.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    Action::ALL
        .iter()
        .copied()
        .find(|action| contains_any(&normalized, action.phrases()))
}

// Table phrases are stored lower-case; only the transcript is normalized
fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| lowered.contains(*phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_substring() {
        assert!(matches("please go to events page", &["go to events"]));
        assert!(!matches("go to the events", &["go to events"]));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        assert!(matches("Show Me The LEADERBOARD", &["leaderboard"]));
        assert!(matches("leaderboard", &["LeaderBoard"]));
    }

    #[test]
    fn test_matches_empty_phrase_list() {
        assert!(!matches("anything at all", &[]));
    }

    #[test]
    fn test_resolve_blank_transcript() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
    }

    #[test]
    fn test_resolve_unknown_transcript() {
        assert_eq!(resolve("what's the weather like"), None);
    }

    #[test]
    fn test_resolve_agrees_with_matches() {
        let transcripts = ["Open The DASHBOARD", "Sign Up now", "go to Leader Board", "hmm"];

        for transcript in transcripts {
            let expected = Action::ALL
                .iter()
                .copied()
                .find(|action| matches(transcript, action.phrases()));
            assert_eq!(resolve(transcript), expected, "{:?}", transcript);
        }
    }

    #[test]
    fn test_resolve_trims_and_lowercases() {
        assert_eq!(resolve("  GO TO EVENTS PAGE  "), Some(Action::Events));
    }
}
