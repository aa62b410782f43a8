use whatlang::Lang;

/// Probabilistic detection hint consulted before the range ladder.
pub trait LanguageDetector: Send + Sync {
    /// None means the detector has no usable opinion.
    fn detect(&self, text: &str) -> Option<DetectedLanguage>;
}

#[derive(Debug, Clone)]
pub struct DetectedLanguage {
    /// ISO 639-1 code.
    pub language: String,
    pub confidence: f64,
}

/// whatlang-backed hint provider. Low-confidence detections are dropped so
/// the range ladder can decide instead.
pub struct WhatlangDetector {
    min_confidence: f64,
}

impl WhatlangDetector {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<DetectedLanguage> {
        let info = whatlang::detect(text)?;
        if info.confidence() < self.min_confidence {
            return None;
        }

        let language = iso_code(info.lang())?;
        Some(DetectedLanguage {
            language: language.to_string(),
            confidence: info.confidence(),
        })
    }
}

/// Disables the probabilistic pass entirely.
pub struct NoDetector;

impl LanguageDetector for NoDetector {
    fn detect(&self, _text: &str) -> Option<DetectedLanguage> {
        None
    }
}

/// Two-letter codes for the languages the pipeline knows about; anything
/// else falls through to the ladder.
fn iso_code(lang: Lang) -> Option<&'static str> {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Hin => "hi",
        Lang::Ara => "ar",
        Lang::Ben => "bn",
        Lang::Ind => "id",
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confident_detection_maps_to_iso_code() {
        let detector = WhatlangDetector::new(0.0);
        let hint = detector
            .detect("Это предложение написано на русском языке")
            .unwrap();
        assert_eq!(hint.language, "ru");
    }

    #[test]
    fn test_threshold_filters_low_confidence() {
        // An impossible bar: everything is dropped.
        let detector = WhatlangDetector::new(2.0);
        assert!(detector.detect("some ambiguous text").is_none());
    }

    #[test]
    fn test_no_detector_never_answers() {
        assert!(NoDetector.detect("whatever").is_none());
    }
}
