use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Flatten a raw selection before it enters the pipeline: NFKC
    /// normalization, newlines to spaces, trimmed ends. Word counting
    /// downstream relies on the text having no leading or trailing
    /// whitespace.
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFKC)
        text = text.nfkc().collect();

        text = text.replace(['\n', '\r'], " ").trim().to_string();

        text
    }
}

pub struct SelectionPreprocessor;
impl Preprocessor for SelectionPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_flattens_newlines() {
        let processed = SelectionPreprocessor.process("  hello\nworld \r\n");
        assert_eq!(processed, "hello world");
    }

    #[test]
    fn test_nfkc_folds_fullwidth_forms() {
        assert_eq!(SelectionPreprocessor.process("ｈｅｌｌｏ"), "hello");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(SelectionPreprocessor.process("   "), "");
    }
}
