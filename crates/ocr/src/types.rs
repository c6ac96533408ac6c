use serde::{Deserialize, Serialize};

/// How an extracted value was located in the OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Value followed the label on the same line, after `:` or `-`.
    SameLine,
    /// Value was the line directly below the label.
    NextLine,
    /// Bank name matched from the gazetteer.
    Gazetteer,
    /// Longest unlabeled digit run.
    DigitRun,
    /// Best-scoring letter-heavy line.
    LineScore,
}

/// A single resolved field and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField {
    pub value: String,
    pub method: ExtractionMethod,
}

impl ExtractedField {
    /// Returns `None` for blank values; an empty field is never a result.
    pub fn new(value: impl Into<String>, method: ExtractionMethod) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self { value, method })
    }
}

/// Lifecycle of a scan as recorded by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OcrStatus {
    Pending,
    Success,
    Failed,
}

impl std::fmt::Display for OcrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrStatus::Pending => write!(f, "pending"),
            OcrStatus::Success => write!(f, "success"),
            OcrStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for OcrStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OcrStatus::Pending),
            "success" => Ok(OcrStatus::Success),
            "failed" => Ok(OcrStatus::Failed),
            other => Err(format!("Unknown OCR status: '{other}'")),
        }
    }
}

/// Structured fields read from a payment-proof image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    /// Normalized OCR text the fields were read from.
    pub raw_text: String,
    /// One note per unresolved field, in bank / number / name order.
    pub confidence_notes: Vec<String>,
}

impl ScanResult {
    pub fn detected_fields(&self) -> usize {
        [&self.bank_name, &self.account_number, &self.account_name]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }

    /// Share of the three fields that were resolved (0.0–1.0).
    pub fn confidence(&self) -> f32 {
        self.detected_fields() as f32 / 3.0
    }

    pub fn status(&self) -> OcrStatus {
        if self.detected_fields() > 0 {
            OcrStatus::Success
        } else {
            OcrStatus::Failed
        }
    }
}

/// Error payload emitted in place of a [`ScanResult`] when the image could
/// not be read or recognized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanFailure {
    pub error: String,
    #[serde(flatten)]
    pub result: ScanResult,
}

impl ScanFailure {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
            result: ScanResult {
                bank_name: None,
                account_number: None,
                account_name: None,
                raw_text: String::new(),
                confidence_notes: vec!["OCR scan failed".to_string()],
            },
        }
    }
}

/// Axis-aligned pixel rectangle, `x0..x1` by `y0..y1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// Outcome of the QR-screenshot autofill path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrAutofillResult {
    /// Whether a QR symbol was found.
    pub ok: bool,
    pub full_name: Option<String>,
    pub qr_payload: Option<String>,
    /// Filled in by whoever writes the crop image; always `None` here.
    pub qr_crop_path: Option<String>,
    pub debug: serde_json::Map<String, serde_json::Value>,
}

impl QrAutofillResult {
    pub fn failed(error: impl std::fmt::Display) -> Self {
        let mut debug = serde_json::Map::new();
        debug.insert("error".into(), serde_json::Value::String(error.to_string()));
        Self {
            ok: false,
            full_name: None,
            qr_payload: None,
            qr_crop_path: None,
            debug,
        }
    }
}
