pub mod preprocess;
pub mod select;
pub mod service;

pub use preprocess::{Preprocessor, SelectionPreprocessor};
pub use select::decide;
pub use service::{ServiceError, TranslationService};
