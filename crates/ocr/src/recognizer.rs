use std::collections::VecDeque;
use std::sync::Mutex;

use hoadon_core::BBox;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Region {0} lies outside the image")]
    EmptyCrop(BBox),
    #[error("Failed to encode enhancement variant: {0}")]
    Encode(String),
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("No variant produced usable text")]
    NoText,
}

/// Abstraction over a text-recognition engine.
/// Implementations accept PNG bytes of one cropped, enhanced region and return its text.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image_png: &[u8]) -> Result<String, RecognitionError>;
}

// ── Mock backends (always available, used for tests) ─────────────────────────

/// Returns a pre-set string for every call.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Recognizer for MockRecognizer {
    fn recognize(&self, _image_png: &[u8]) -> Result<String, RecognitionError> {
        Ok(self.text.clone())
    }
}

/// Replays queued answers in call order, then returns empty text.
pub struct ScriptedRecognizer {
    answers: Mutex<VecDeque<Result<String, RecognitionError>>>,
}

impl ScriptedRecognizer {
    pub fn new(answers: impl IntoIterator<Item = Result<String, RecognitionError>>) -> Self {
        Self { answers: Mutex::new(answers.into_iter().collect()) }
    }

    /// Convenience for scripts without failures.
    pub fn texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.into())))
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&self, _image_png: &[u8]) -> Result<String, RecognitionError> {
        let mut answers = self
            .answers
            .lock()
            .map_err(|e| RecognitionError::Engine(e.to_string()))?;
        answers.pop_front().unwrap_or_else(|| Ok(String::new()))
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{RecognitionError, Recognizer};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }

        /// Vietnamese language data from the default tessdata location.
        pub fn vietnamese() -> Self {
            Self::new(None, "vie")
        }
    }

    impl Recognizer for TesseractRecognizer {
        fn recognize(&self, image_png: &[u8]) -> Result<String, RecognitionError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| RecognitionError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_png)
                .map_err(|e| RecognitionError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text()
                .map(|t| t.trim().to_string())
                .map_err(|e| RecognitionError::Engine(e.to_string()))
        }
    }
}
