//! Tokenization and fuzzy string similarity

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens with this many characters or fewer are discarded
pub const MIN_TOKEN_CHARS: usize = 2;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid pattern"));

/// Split text into lowercase word tokens, dropping tokens of two characters or less
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_WORD
        .split(&lower)
        .filter(|t| char_len(t) > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Distinct tokens in first-seen order
pub fn unique_tokens(text: &str) -> IndexSet<String> {
    tokenize(text).into_iter().collect()
}

/// Length in characters, not bytes
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// True if either string contains the other
pub(crate) fn substring_related(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Normalized Levenshtein ratio in 0..=1.
///
/// Symmetric; identical strings (including two empty strings) give 1.0.
pub fn calculate_word_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    strsim::normalized_levenshtein(a, b)
}

/// Dice-style token overlap between two texts, 0..=100.
///
/// A token of `text1` counts as shared when it contains, or is contained in,
/// some token of `text2`. Returns 0 when either text has no tokens.
pub fn calculate_similarity(text1: &str, text2: &str) -> f64 {
    let tokens1 = unique_tokens(text1);
    let tokens2 = unique_tokens(text2);

    if tokens1.is_empty() || tokens2.is_empty() {
        return 0.0;
    }

    let intersection = tokens1
        .iter()
        .filter(|t1| tokens2.iter().any(|t2| substring_related(t1, t2)))
        .count();

    let dice = (2 * intersection) as f64 / (tokens1.len() + tokens2.len()) as f64;
    (dice * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert_eq!(
            tokenize("Dit is voor kinderen van 8 jaar oud!"),
            vec!["dit", "voor", "kinderen", "van", "jaar", "oud"]
        );
    }

    #[test]
    fn test_tokenize_counts_characters() {
        // "éé" is four bytes but two characters
        assert_eq!(tokenize("éé één café"), vec!["één", "café"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,. a b ").is_empty());
    }

    #[test]
    fn test_word_similarity_contract() {
        assert_eq!(calculate_word_similarity("kinderen", "kinderen"), 1.0);
        assert_eq!(calculate_word_similarity("", ""), 1.0);
        assert_eq!(
            calculate_word_similarity("regels", "regel"),
            calculate_word_similarity("regel", "regels")
        );
        assert!(calculate_word_similarity("kinderen", "kindern") > 0.8);
        assert!(calculate_word_similarity("kinderen", "tabel") < 0.5);
        assert!(
            calculate_word_similarity("gedicht", "gedicht")
                > calculate_word_similarity("gedicht", "gedichtje")
        );
    }

    #[test]
    fn test_similarity_identical() {
        let text = "Schrijf een gedicht van 10 regels voor kinderen";
        assert_eq!(calculate_similarity(text, text), 100.0);
    }

    #[test]
    fn test_similarity_empty_side() {
        assert_eq!(calculate_similarity("", "iets"), 0.0);
        assert_eq!(calculate_similarity("iets leuks", "a b"), 0.0);
    }

    #[test]
    fn test_similarity_partial() {
        // tokens1 = {schrijf, gedicht}, tokens2 = {schrijf, verhaal}
        let score = calculate_similarity("schrijf gedicht", "schrijf verhaal");
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_clamped() {
        // Three tokens of text1 all relate to the single token of text2
        let score = calculate_similarity("kind kinds kinderen", "kind");
        assert_eq!(score, 100.0);
    }
}
