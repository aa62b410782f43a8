/// True if the text contains any CJK-scripted code point.
///
/// Covered ranges: CJK punctuation, hiragana, katakana, fullwidth forms,
/// unified ideographs and hangul syllables. Scripts without
/// whitespace-delimited words need character-count heuristics instead of
/// word-count ones.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

fn is_cjk_char(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303f}'
            | '\u{3040}'..='\u{309f}'
            | '\u{30a0}'..='\u{30ff}'
            | '\u{ff00}'..='\u{ffef}'
            | '\u{4e00}'..='\u{9faf}'
            | '\u{ac00}'..='\u{d7af}')
}
