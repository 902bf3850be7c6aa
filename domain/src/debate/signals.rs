//! Control-signal extraction from free-form model output.
//!
//! The debate "protocol" is literally conversational text: the Critic embeds
//! an agreement flag and the Solver embeds a final answer as inline tags.
//! All text inspection is isolated here so the state machine only ever
//! observes typed signals (`Option<bool>` / `Option<String>`), never raw
//! text. Both functions are pure: no side effects, deterministic,
//! idempotent.
//!
//! # Functions
//!
//! | Function | Tag | Result |
//! |----------|-----|--------|
//! | [`extract_agreement`] | `<AGREE>true\|false</AGREE>` | `Option<bool>` |
//! | [`extract_final_answer`] | `<FINAL>…</FINAL>` | trimmed `Option<String>` |

use regex::Regex;
use std::sync::LazyLock;

static AGREE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<AGREE>(true|false)</AGREE>").unwrap());

static FINAL_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<FINAL>(.*?)</FINAL>").unwrap());

/// Extract the Critic's agreement flag from a response.
///
/// Case-insensitive; the first occurrence wins. Returns `None` when the
/// response carries no tag, which the orchestrator treats as continued
/// disagreement.
pub fn extract_agreement(text: &str) -> Option<bool> {
    AGREE_TAG
        .captures(text)
        .map(|caps| caps[1].eq_ignore_ascii_case("true"))
}

/// Extract the Solver's final answer from a response.
///
/// Case-insensitive, non-greedy, and the tag body may span multiple lines.
/// Returns the trimmed inner content of the first match.
pub fn extract_final_answer(text: &str) -> Option<String> {
    FINAL_TAG
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== extract_agreement Tests ====================

    #[test]
    fn test_agreement_true() {
        assert_eq!(extract_agreement("<AGREE>true</AGREE> Convinced."), Some(true));
    }

    #[test]
    fn test_agreement_false() {
        assert_eq!(
            extract_agreement("<AGREE>false</AGREE> Show your work."),
            Some(false)
        );
    }

    #[test]
    fn test_agreement_case_insensitive() {
        assert_eq!(extract_agreement("<agree>TRUE</agree>"), Some(true));
        assert_eq!(extract_agreement("<Agree>False</Agree>"), Some(false));
    }

    #[test]
    fn test_agreement_embedded_in_text() {
        let text = "Some reasoning first. <AGREE>true</AGREE> And a remark after.";
        assert_eq!(extract_agreement(text), Some(true));
    }

    #[test]
    fn test_agreement_first_match_wins() {
        let text = "<AGREE>false</AGREE> hmm, actually <AGREE>true</AGREE>";
        assert_eq!(extract_agreement(text), Some(false));
    }

    #[test]
    fn test_agreement_absent() {
        assert_eq!(extract_agreement("I disagree but forgot the tag."), None);
        assert_eq!(extract_agreement(""), None);
    }

    // ==================== extract_final_answer Tests ====================

    #[test]
    fn test_final_answer() {
        assert_eq!(extract_final_answer("<FINAL>42</FINAL>").as_deref(), Some("42"));
    }

    #[test]
    fn test_final_answer_case_insensitive() {
        assert_eq!(
            extract_final_answer("<final>hello world</final>").as_deref(),
            Some("hello world")
        );
    }

    #[test]
    fn test_final_answer_multiline() {
        let text = "<FINAL>first line\nsecond line</FINAL>";
        assert_eq!(
            extract_final_answer(text).as_deref(),
            Some("first line\nsecond line")
        );
    }

    #[test]
    fn test_final_answer_trimmed() {
        assert_eq!(
            extract_final_answer("<FINAL>\n  14  \n</FINAL>").as_deref(),
            Some("14")
        );
    }

    #[test]
    fn test_final_answer_non_greedy() {
        let text = "<FINAL>a</FINAL> junk <FINAL>b</FINAL>";
        assert_eq!(extract_final_answer(text).as_deref(), Some("a"));
    }

    #[test]
    fn test_final_answer_absent() {
        assert_eq!(extract_final_answer("No tags anywhere."), None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "<AGREE>true</AGREE> <FINAL>7</FINAL>";
        for _ in 0..3 {
            assert_eq!(extract_agreement(text), Some(true));
            assert_eq!(extract_final_answer(text).as_deref(), Some("7"));
        }
    }
}
