use std::sync::OnceLock;

use regex::Regex;

/// Letters of the Arabic block that can appear in study content: hamza forms,
/// alef variants, the 28 base letters, taa marbuta and alef maqsura.
pub fn is_arabic_letter(c: char) -> bool {
    matches!(c, '\u{0621}'..='\u{063A}' | '\u{0641}'..='\u{064A}')
}

/// Characters accepted between root letters in user input.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | ',' | '،' | '.' | '\u{0640}')
}

fn diacritics_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Harakat, tanwin, shadda, sukun, Quranic annotations, superscript
        // alef, and tatweel.
        Regex::new(r"[\u{0610}-\u{061A}\u{064B}-\u{065F}\u{0670}\u{06D6}-\u{06ED}\u{0640}]")
            .unwrap()
    })
}

pub fn strip_diacritics(text: &str) -> String {
    diacritics_re().replace_all(text, "").to_string()
}

/// Comparison form used when matching a word's free-text root against a
/// stored Root: diacritics removed, alef/hamza-on-alef variants folded to
/// bare alef, alef maqsura folded to yaa. Hamza carriers waw/yaa stay as
/// written since they are root-significant.
pub fn normalize_for_comparison(text: &str) -> String {
    strip_diacritics(text)
        .chars()
        .map(|c| match c {
            'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
            'ى' => 'ي',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_classification() {
        for c in "كتبءةىؤئ".chars() {
            assert!(is_arabic_letter(c), "expected letter: {}", c);
        }

        assert!(!is_arabic_letter('a'));
        assert!(!is_arabic_letter('3'));
        assert!(!is_arabic_letter('ً')); // fathatan
        assert!(!is_arabic_letter('\u{0640}')); // tatweel
    }

    #[test]
    fn test_strip_diacritics() {
        // Fully vocalized "kataba" loses its harakat
        assert_eq!(strip_diacritics("كَتَبَ"), "كتب");
        // Shadda and sukun
        assert_eq!(strip_diacritics("مُدَرِّسْ"), "مدرس");
        // Tatweel is stripped as well
        assert_eq!(strip_diacritics("كـتـب"), "كتب");
        // Unvocalized text is untouched
        assert_eq!(strip_diacritics("مدرسة"), "مدرسة");
    }

    #[test]
    fn test_normalize_for_comparison() {
        assert_eq!(normalize_for_comparison("أكل"), "اكل");
        assert_eq!(normalize_for_comparison("إِسلام"), "اسلام");
        assert_eq!(normalize_for_comparison("مستشفى"), "مستشفي");
        // Hamza on waw is preserved
        assert_eq!(normalize_for_comparison("سؤال"), "سؤال");
    }
}
