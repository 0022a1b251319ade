use serde::{
    Deserialize,
    Serialize,
};

use super::script::{
    is_arabic_letter,
    is_separator,
    normalize_for_comparison,
    strip_diacritics,
};

// Historically attested root lengths. Triliteral is the canonical case;
// anything outside this range is flagged, not rejected with an error.
pub const MIN_ROOT_LETTERS: usize = 2;
pub const MAX_ROOT_LETTERS: usize = 5;

/// Canonical decomposition of a user-entered root string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRoot {
    pub letters: Vec<String>,
    pub normalized_form: String,
    pub display_form: String,
    pub letter_count: usize,
    pub is_valid: bool,
}

/// Extracts the letter sequence from free-text root input. Separators
/// (spaces, dashes, tatweel, commas) and diacritics are dropped; any other
/// non-Arabic character marks the whole input invalid while still yielding
/// the letters that could be read.
///
/// Normalizing an already-normalized form returns the same
/// `normalized_form` (round-trip law).
pub fn normalize(input: &str) -> NormalizedRoot {
    let mut letters: Vec<String> = Vec::new();
    let mut foreign = false;

    for c in strip_diacritics(input).chars() {
        if is_separator(c) {
            continue;
        }
        if is_arabic_letter(c) {
            letters.push(c.to_string());
        } else {
            foreign = true;
        }
    }

    let normalized_form = letters.concat();
    let display_form = letters.join(" ");
    let letter_count = letters.len();
    let is_valid = !foreign
        && letter_count >= MIN_ROOT_LETTERS
        && letter_count <= MAX_ROOT_LETTERS;

    NormalizedRoot { letters, normalized_form, display_form, letter_count, is_valid }
}

/// Whether two root spellings name the same root. Both sides are normalized
/// and folded, so a vocalized "كَتَبَ", a spaced "ك ت ب" and a stored
/// normalized form all compare equal.
pub fn same_root(a: &str, b: &str) -> bool {
    let a = normalize_for_comparison(&normalize(a).normalized_form);
    let b = normalize_for_comparison(&normalize(b).normalized_form);
    !a.is_empty() && a == b
}
