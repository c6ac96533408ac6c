use std::sync::OnceLock;

pub mod barcode;
pub mod config;
pub mod extract;
pub mod labels;
pub mod name_region;
pub mod normalize;
pub mod pipeline;
pub mod recognizer;
pub mod report;
pub mod types;

pub use barcode::{largest_symbol, BarcodeDecoder, BarcodeError, BoundingBox, DecodedSymbol, MockDecoder};
pub use config::{ConfigError, ExtractorConfig, NameRegion};
pub use extract::Extractor;
pub use labels::{find_value_after_labels, ExtractionCandidate, LabelSet};
pub use name_region::clean_display_name;
pub use normalize::normalize;
pub use pipeline::{PaymentProofPipeline, PipelineError, QrAutofillPipeline};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
pub use types::{
    ExtractedField, ExtractionMethod, OcrStatus, PixelRect, QrAutofillResult, ScanFailure, ScanResult,
};

fn default_extractor() -> &'static Extractor {
    static EXTRACTOR: OnceLock<Extractor> = OnceLock::new();
    EXTRACTOR.get_or_init(Extractor::default)
}

/// Extract bank name, account number and account name from payment-proof OCR
/// text using the built-in labels and gazetteer.
pub fn scan_payment_proof(raw_text: &str) -> ScanResult {
    default_extractor().scan(raw_text)
}

/// Clean OCR text read from the name band of a QR screenshot.
pub fn extract_display_name(region_text: &str) -> Option<String> {
    default_extractor().display_name(region_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_payment_proof_uses_builtin_lists() {
        let r = scan_payment_proof("RHB Now\nAccount Number\n1234-5678-9012\nPayee: NG KAH WAI");
        assert_eq!(r.bank_name.as_deref(), Some("Rhb"));
        assert_eq!(r.account_number.as_deref(), Some("123456789012"));
        assert_eq!(r.account_name.as_deref(), Some("NG KAH WAI"));
        assert!(r.confidence_notes.is_empty());
    }

    #[test]
    fn scan_payment_proof_serializes_to_contract() {
        let json = serde_json::to_value(scan_payment_proof("?? 42 ??")).unwrap();
        assert!(json["bank_name"].is_null());
        assert_eq!(json["raw_text"], "?? 42 ??");
        assert_eq!(json["confidence_notes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn extract_display_name_gates_length() {
        assert_eq!(extract_display_name("TOUCH 'N GO EWALLET\nAHMAD BIN ALI").as_deref(), Some("AHMAD BIN ALI"));
        assert_eq!(extract_display_name("eWallet\nLIM"), None);
    }
}
