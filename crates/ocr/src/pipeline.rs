use std::path::Path;
use thiserror::Error;

use crate::barcode::{self, BarcodeDecoder, BarcodeError, QR_CROP_PAD_RATIO};
use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::{QrAutofillResult, ScanResult};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read image: {0}")]
    Image(#[from] image::ImageError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Barcode decoding failed: {0}")]
    Barcode(#[from] BarcodeError),
}

// ── Payment proof ─────────────────────────────────────────────────────────────

/// Orchestrates: read → OCR → extract bank / account number / account name.
pub struct PaymentProofPipeline<R: OcrBackend> {
    recognizer: R,
    extractor: Extractor,
}

impl<R: OcrBackend> PaymentProofPipeline<R> {
    pub fn new(recognizer: R, extractor: Extractor) -> Self {
        Self { recognizer, extractor }
    }

    /// Process a file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Scanning payment proof: {}", path.display());
        self.process_bytes(&bytes)
    }

    /// Process raw image bytes (upload body or file read).
    pub fn process_bytes(&self, data: &[u8]) -> Result<ScanResult, PipelineError> {
        let ocr_text = self.recognizer.recognize(data)?;
        let result = self.extractor.scan(&ocr_text);

        tracing::info!(
            detected = result.detected_fields(),
            status = %result.status(),
            "Payment proof scanned"
        );
        Ok(result)
    }
}

// ── QR screenshot ─────────────────────────────────────────────────────────────

/// Orchestrates: probe size → decode QR → OCR the name band → clean the name.
pub struct QrAutofillPipeline<R: OcrBackend, D: BarcodeDecoder> {
    recognizer: R,
    decoder: D,
    extractor: Extractor,
}

impl<R: OcrBackend, D: BarcodeDecoder> QrAutofillPipeline<R, D> {
    pub fn new(recognizer: R, decoder: D, extractor: Extractor) -> Self {
        Self { recognizer, decoder, extractor }
    }

    pub async fn process_file(&self, path: &Path) -> Result<QrAutofillResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Reading QR screenshot: {}", path.display());
        self.process_bytes(&bytes)
    }

    pub fn process_bytes(&self, data: &[u8]) -> Result<QrAutofillResult, PipelineError> {
        let img = image::load_from_memory(data)?;
        let (width, height) = (img.width(), img.height());

        let symbols = self.decoder.decode(data)?;
        let full_name = self.read_display_name(data, width, height)?;

        let mut debug = serde_json::Map::new();
        let Some(symbol) = barcode::largest_symbol(&symbols) else {
            tracing::warn!("QR not detected in {width}x{height} screenshot");
            debug.insert("reason".into(), "QR not detected".into());
            return Ok(QrAutofillResult {
                ok: false,
                full_name,
                qr_payload: None,
                qr_crop_path: None,
                debug,
            });
        };

        let b = symbol.bbox;
        let crop = b.expand(QR_CROP_PAD_RATIO, width, height);
        let qr_payload = symbol.payload.clone().filter(|p| !p.is_empty());

        debug.insert("bbox".into(), serde_json::json!([b.x, b.y, b.width, b.height]));
        debug.insert("payload_present".into(), qr_payload.is_some().into());
        debug.insert("crop_rect".into(), serde_json::json!([crop.x0, crop.y0, crop.x1, crop.y1]));

        tracing::info!(
            payload_present = qr_payload.is_some(),
            name_found = full_name.is_some(),
            "QR screenshot processed"
        );
        Ok(QrAutofillResult {
            ok: true,
            full_name,
            qr_payload,
            qr_crop_path: None,
            debug,
        })
    }

    fn read_display_name(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Option<String>, PipelineError> {
        let region = self.extractor.name_region().rect(width, height);
        let region_text = self.recognizer.recognize_region(data, region)?;
        Ok(self.extractor.display_name(&region_text))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
