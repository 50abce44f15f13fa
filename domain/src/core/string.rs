//! String utilities for the domain layer.

/// Lowercase and trim a string for comparison
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Similarity of two strings in `0.0..=1.0`, case-insensitive
///
/// Takes the better of the whole-string normalized Levenshtein similarity
/// and the best similarity of the shorter string against any equally long
/// window of the longer one, so a correct first name still scores high
/// against a stored "first middle" name.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return if a == b { 1.0 } else { 0.0 };
    }
    strsim::normalized_levenshtein(&a, &b).max(partial_similarity(&a, &b))
}

fn partial_similarity(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();

    long_chars
        .windows(short_len)
        .map(|window| {
            let window: String = window.iter().collect();
            strsim::normalized_levenshtein(short, &window)
        })
        .fold(0.0, f64::max)
}

/// Token-set similarity: compares the sorted sets of whitespace separated words
pub fn token_set_similarity(a: &str, b: &str) -> f64 {
    let tokens = |s: &str| {
        let mut words: Vec<String> = normalize(s)
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort();
        words.dedup();
        words.join(" ")
    };
    let (a, b) = (tokens(a), tokens(b));
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(&a, &b)
}
