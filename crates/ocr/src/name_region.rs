use crate::config::NameRegion;
use crate::normalize::collapse_whitespace;
use crate::types::PixelRect;

const MIN_DISPLAY_NAME_LEN: usize = 5;

/// Turn OCR text from the name band of a QR screenshot into a display name.
///
/// `noise` phrases must be lowercase. They are removed as literal substrings,
/// so a short phrase such as `"pay"` also cuts into names that contain it.
pub fn clean_display_name(region_text: &str, noise: &[String]) -> Option<String> {
    let mut low = collapse_whitespace(region_text).to_lowercase();
    for phrase in noise {
        low = low.replace(phrase.as_str(), "");
    }

    let kept: String = low
        .chars()
        .filter(|&c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '\'' | '.' | '-'))
        .collect();
    let candidate = collapse_whitespace(&kept);

    if candidate.chars().count() < MIN_DISPLAY_NAME_LEN {
        return None;
    }
    Some(candidate.to_uppercase())
}

impl NameRegion {
    /// Pixel bounds of the region inside a `width` x `height` image.
    pub fn rect(&self, width: u32, height: u32) -> PixelRect {
        let scale = |fraction: f64, dim: u32| (fraction * f64::from(dim)).floor() as u32;
        PixelRect {
            x0: scale(self.left, width),
            y0: scale(self.top, height),
            x1: scale(self.right, width),
            y1: scale(self.bottom, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_QR_NOISE;

    fn clean(text: &str) -> Option<String> {
        let noise: Vec<String> = DEFAULT_QR_NOISE.iter().map(|s| s.to_string()).collect();
        clean_display_name(text, &noise)
    }

    #[test]
    fn strips_wallet_branding() {
        assert_eq!(clean("TOUCH 'N GO EWALLET\nAHMAD BIN ALI").as_deref(), Some("AHMAD BIN ALI"));
    }

    #[test]
    fn strips_duitnow_banner_and_symbols() {
        let text = "DuitNow QR\n  NUR AISYAH | 2024\nScan with any banking apps";
        assert_eq!(clean(text).as_deref(), Some("NUR AISYAH"));
    }

    #[test]
    fn keeps_apostrophe_period_hyphen() {
        assert_eq!(clean("MOHD. O'BRIEN-LIM").as_deref(), Some("MOHD. O'BRIEN-LIM"));
    }

    #[test]
    fn too_short_after_cleaning() {
        assert_eq!(clean("Touch 'n Go eWallet\nAli 99"), None);
        assert_eq!(clean(""), None);
        assert_eq!(clean("DuitNow QR"), None);
    }

    #[test]
    fn noise_phrase_cuts_into_names() {
        assert_eq!(clean("PAYNE SMITH").as_deref(), Some("NE SMITH"));
    }

    #[test]
    fn default_region_rect() {
        let r = NameRegion::default().rect(1000, 2000);
        assert_eq!(r, PixelRect { x0: 100, y0: 200, x1: 900, y1: 800 });
    }

    #[test]
    fn region_rect_floors() {
        let r = NameRegion::default().rect(15, 15);
        assert_eq!(r, PixelRect { x0: 1, y0: 1, x1: 13, y1: 6 });
    }
}
