pub mod cjk;
pub mod detect;
pub mod estimate;

pub use cjk::contains_cjk;
pub use detect::{DetectedLanguage, LanguageDetector, NoDetector, WhatlangDetector};
pub use estimate::estimate_source_language;
