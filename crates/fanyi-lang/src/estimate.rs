use crate::detect::DetectedLanguage;

const FRENCH_MARKS: &str = "àâæçéèêëîïôœùûüÿÀÂÆÇÉÈÊËÎÏÔŒÙÛÜŸ";
const GERMAN_MARKS: &str = "äöüßÄÖÜẞ";
const SPANISH_MARKS: &str = "áéíóúñÁÉÍÓÚÑ¿¡";
const PORTUGUESE_MARKS: &str = "ãõáâàêéíóôúçÃÕÁÂÀÊÉÍÓÔÚÇ";

/// Best-effort source-language estimate for a history record.
///
/// A probabilistic detector hint wins when present; otherwise an ordered
/// ladder of Unicode-range and diacritic checks runs, first match wins. The
/// ladder is intentionally approximate; its value is that the same input
/// always produces the same label.
pub fn estimate_source_language(text: &str, hint: Option<&DetectedLanguage>) -> String {
    if let Some(hint) = hint {
        if !hint.language.is_empty() && hint.language != "unknown" {
            return hint.language.clone();
        }
    }

    ladder(text).unwrap_or("unknown").to_string()
}

fn ladder(text: &str) -> Option<&'static str> {
    if has_range(text, '\u{0900}', '\u{097f}') {
        return Some("hi"); // Devanagari
    }
    if has_range(text, '\u{0600}', '\u{06ff}') {
        return Some("ar");
    }
    if has_range(text, '\u{0980}', '\u{09ff}') {
        return Some("bn");
    }
    if has_range(text, '\u{ac00}', '\u{d7af}') {
        return Some("ko");
    }
    if has_range(text, '\u{3040}', '\u{30ff}') {
        return Some("ja"); // hiragana + katakana
    }
    if has_range(text, '\u{4e00}', '\u{9fff}') {
        return Some("zh");
    }
    if has_range(text, '\u{0400}', '\u{04ff}') {
        return Some("ru");
    }
    if has_mark(text, FRENCH_MARKS) {
        return Some("fr");
    }
    if has_mark(text, GERMAN_MARKS) {
        return Some("de");
    }
    if has_mark(text, SPANISH_MARKS) {
        return Some("es");
    }
    if has_mark(text, PORTUGUESE_MARKS) {
        return Some("pt");
    }
    if looks_like_english(text) {
        return Some("en");
    }
    None
}

fn has_range(text: &str, start: char, end: char) -> bool {
    text.chars().any(|c| (start..=end).contains(&c))
}

fn has_mark(text: &str, marks: &str) -> bool {
    text.chars().any(|c| marks.contains(c))
}

/// Unaccented Latin letters plus common punctuation, and at least one
/// letter so bare numbers stay unknown.
fn looks_like_english(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
        && text.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c.is_ascii_whitespace()
                || ".,!?'\"()-:;".contains(c)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(language: &str) -> DetectedLanguage {
        DetectedLanguage {
            language: language.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_hint_takes_priority_over_ladder() {
        // Ladder alone would say "ja"; the hint wins.
        assert_eq!(
            estimate_source_language("ひらがな", Some(&hint("ko"))),
            "ko"
        );
    }

    #[test]
    fn test_unknown_hint_falls_through_to_ladder() {
        assert_eq!(
            estimate_source_language("ひらがな", Some(&hint("unknown"))),
            "ja"
        );
    }

    #[test]
    fn test_ladder_order_scripts() {
        assert_eq!(estimate_source_language("नमस्ते", None), "hi");
        assert_eq!(estimate_source_language("مرحبا", None), "ar");
        assert_eq!(estimate_source_language("হ্যালো", None), "bn");
        assert_eq!(estimate_source_language("안녕하세요", None), "ko");
        assert_eq!(estimate_source_language("こんにちは", None), "ja");
        assert_eq!(estimate_source_language("你好", None), "zh");
        assert_eq!(estimate_source_language("привет", None), "ru");
    }

    #[test]
    fn test_kana_beats_ideographs() {
        // Mixed kana/kanji text is Japanese, not Chinese: kana ranks higher.
        assert_eq!(estimate_source_language("日本語のテキスト", None), "ja");
    }

    #[test]
    fn test_diacritic_rules() {
        assert_eq!(estimate_source_language("déjà vu", None), "fr");
        assert_eq!(estimate_source_language("größe", None), "de");
        assert_eq!(estimate_source_language("mañana", None), "es");
        // ã and õ are the marks no earlier rule claims.
        assert_eq!(estimate_source_language("limões", None), "pt");
    }

    #[test]
    fn test_plain_latin_is_english() {
        assert_eq!(estimate_source_language("hello, world!", None), "en");
    }

    #[test]
    fn test_no_rule_matches() {
        assert_eq!(estimate_source_language("12345", None), "unknown");
        assert_eq!(estimate_source_language("กรุงเทพ", None), "unknown");
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let first = estimate_source_language("über alles", None);
        let second = estimate_source_language("über alles", None);
        assert_eq!(first, second);
    }
}
