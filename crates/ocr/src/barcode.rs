use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PixelRect;

/// Padding around the detected symbol when cutting the QR preview.
pub const QR_CROP_PAD_RATIO: f64 = 0.22;

#[derive(Debug, Error)]
pub enum BarcodeError {
    #[error("Barcode decoder error: {0}")]
    Decoder(String),
}

/// Symbol bounds as reported by the decoder: top-left corner plus size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Grow by `max(width, height) * pad_ratio` on every side, clamped to the image.
    pub fn expand(&self, pad_ratio: f64, image_width: u32, image_height: u32) -> PixelRect {
        let pad = (f64::from(self.width.max(self.height)) * pad_ratio).floor() as u32;
        PixelRect {
            x0: self.x.saturating_sub(pad),
            y0: self.y.saturating_sub(pad),
            x1: self.x.saturating_add(self.width).saturating_add(pad).min(image_width),
            y1: self.y.saturating_add(self.height).saturating_add(pad).min(image_height),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub bbox: BoundingBox,
    /// Decoded contents; absent when the symbol was located but not read.
    pub payload: Option<String>,
}

/// Abstraction over a 2D barcode decoder.
pub trait BarcodeDecoder: Send + Sync {
    fn decode(&self, image_bytes: &[u8]) -> Result<Vec<DecodedSymbol>, BarcodeError>;
}

/// The symbol covering the most pixels; the earliest one on a tie.
pub fn largest_symbol(symbols: &[DecodedSymbol]) -> Option<&DecodedSymbol> {
    symbols.iter().fold(None, |best: Option<&DecodedSymbol>, s| match best {
        Some(b) if b.bbox.area() >= s.bbox.area() => Some(b),
        _ => Some(s),
    })
}

// ── Mock decoder ──────────────────────────────────────────────────────────────

pub struct MockDecoder {
    pub symbols: Vec<DecodedSymbol>,
}

impl MockDecoder {
    pub fn new(symbols: Vec<DecodedSymbol>) -> Self {
        Self { symbols }
    }

    pub fn empty() -> Self {
        Self { symbols: vec![] }
    }
}

impl BarcodeDecoder for MockDecoder {
    fn decode(&self, _image_bytes: &[u8]) -> Result<Vec<DecodedSymbol>, BarcodeError> {
        Ok(self.symbols.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(x: u32, y: u32, w: u32, h: u32, payload: Option<&str>) -> DecodedSymbol {
        DecodedSymbol {
            bbox: BoundingBox { x, y, width: w, height: h },
            payload: payload.map(String::from),
        }
    }

    #[test]
    fn largest_by_area() {
        let symbols = [sym(0, 0, 10, 10, None), sym(5, 5, 40, 30, Some("b")), sym(0, 0, 20, 20, None)];
        assert_eq!(largest_symbol(&symbols).unwrap().payload.as_deref(), Some("b"));
    }

    #[test]
    fn largest_tie_keeps_first() {
        let symbols = [sym(0, 0, 10, 20, Some("a")), sym(0, 0, 20, 10, Some("b"))];
        assert_eq!(largest_symbol(&symbols).unwrap().payload.as_deref(), Some("a"));
    }

    #[test]
    fn largest_of_none() {
        assert!(largest_symbol(&[]).is_none());
    }

    #[test]
    fn expand_pads_and_clamps() {
        let b = BoundingBox { x: 100, y: 300, width: 200, height: 200 };
        // pad = floor(200 * 0.22) = 44
        assert_eq!(
            b.expand(QR_CROP_PAD_RATIO, 1080, 1920),
            PixelRect { x0: 56, y0: 256, x1: 344, y1: 544 }
        );

        let edge = BoundingBox { x: 10, y: 5, width: 100, height: 50 };
        assert_eq!(edge.expand(0.5, 120, 80), PixelRect { x0: 0, y0: 0, x1: 120, y1: 80 });
    }

    #[test]
    fn mock_decoder_returns_symbols() {
        let d = MockDecoder::new(vec![sym(1, 2, 3, 4, Some("000201"))]);
        assert_eq!(d.decode(b"").unwrap().len(), 1);
        assert!(MockDecoder::empty().decode(b"").unwrap().is_empty());
    }
}
