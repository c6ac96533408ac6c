use thiserror::Error;

use crate::types::PixelRect;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available, build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return the recognized text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;

    /// Recognize only the pixels inside `region`.
    fn recognize_region(&self, image_bytes: &[u8], region: PixelRect) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns pre-set strings, so the extraction pipelines can be exercised
/// without Tesseract installed.
pub struct MockRecognizer {
    pub text: String,
    pub region_text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), region_text: String::new() }
    }

    pub fn with_region_text(mut self, region_text: impl Into<String>) -> Self {
        self.region_text = region_text.into();
        self
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }

    fn recognize_region(&self, _image_bytes: &[u8], _region: PixelRect) -> Result<String, OcrError> {
        Ok(self.region_text.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use crate::types::PixelRect;
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }

        fn load(&self, image_bytes: &[u8]) -> Result<LepTess, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            Ok(lt)
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = self.load(image_bytes)?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }

        fn recognize_region(&self, image_bytes: &[u8], region: PixelRect) -> Result<String, OcrError> {
            let mut lt = self.load(image_bytes)?;
            lt.set_rectangle(
                region.x0 as i32,
                region.y0 as i32,
                region.width() as i32,
                region.height() as i32,
            );
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("MAYBANK\nAcc No: 1234567890");
        assert_eq!(r.recognize(b"fake image data").unwrap(), "MAYBANK\nAcc No: 1234567890");
    }

    #[test]
    fn mock_region_text_is_separate() {
        let r = MockRecognizer::new("full page").with_region_text("AHMAD BIN ALI");
        let rect = PixelRect { x0: 0, y0: 0, x1: 10, y1: 10 };
        assert_eq!(r.recognize_region(b"", rect).unwrap(), "AHMAD BIN ALI");
        assert_eq!(r.recognize(b"").unwrap(), "full page");
    }

    #[test]
    fn mock_region_defaults_to_empty() {
        let r = MockRecognizer::new("hello");
        let rect = PixelRect { x0: 0, y0: 0, x1: 1, y1: 1 };
        assert_eq!(r.recognize_region(b"anything", rect).unwrap(), "");
    }
}
