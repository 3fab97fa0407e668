use icu_normalizer::ComposingNormalizer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Compare learner input to the reference answer: NFC-normalize, trim,
/// case-fold, exact equality. Binary by design; punctuation and wording
/// must match, so learners can rely on stable pass/fail semantics.
pub fn check(input: &str, reference: &str) -> Verdict {
    if normalize(input) == normalize(reference) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

fn normalize(text: &str) -> String {
    let nfc = ComposingNormalizer::new_nfc();
    nfc.normalize(text.trim()).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_case_fold_match() {
        assert_eq!(check(" hello ", "Hello"), Verdict::Correct);
        assert_eq!(check("HELLO WORLD", "hello world"), Verdict::Correct);
    }

    #[test]
    fn test_punctuation_difference_is_incorrect() {
        assert_eq!(check("Hello!", "Hello"), Verdict::Incorrect);
    }

    #[test]
    fn test_wording_difference_is_incorrect() {
        assert_eq!(check("hi there", "hello there"), Verdict::Incorrect);
    }

    #[test]
    fn test_empty_input_against_nonempty_reference() {
        assert_eq!(check("", "Hello"), Verdict::Incorrect);
        assert_eq!(check("   ", "Hello"), Verdict::Incorrect);
    }

    #[test]
    fn test_interior_whitespace_is_significant() {
        assert_eq!(check("hello  world", "hello world"), Verdict::Incorrect);
    }

    #[test]
    fn test_composed_and_decomposed_forms_match() {
        // "café" typed with a combining accent vs the precomposed char.
        assert_eq!(check("cafe\u{301}", "caf\u{e9}"), Verdict::Correct);
    }
}
