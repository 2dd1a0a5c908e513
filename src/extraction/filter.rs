use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace is Unicode `\s` plus the separators U+001C..U+001F.
static NON_LATIN_OR_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z\s\x{1C}-\x{1F}]").expect("valid latin filter pattern")
});

// CJK Unified Ideographs (U+4E00..U+9FA5) and Extension A (U+3400..U+4DBF).
static NON_CJK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x{4E00}-\x{9FA5}\x{3400}-\x{4DBF}]").expect("valid cjk filter pattern")
});

/// Keeps only ASCII letters and whitespace.
pub fn latin_words(input: &str) -> String {
    NON_LATIN_OR_SPACE.replace_all(input, "").into_owned()
}

/// Keeps only characters in the two CJK ideograph blocks.
pub fn chinese_characters(input: &str) -> String {
    NON_CJK.replace_all(input, "").into_owned()
}
