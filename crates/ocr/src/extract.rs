use crate::config::{ExtractorConfig, NameRegion};
use crate::labels::{find_value_after_labels, LabelSet};
use crate::name_region;
use crate::normalize;
use crate::report;
use crate::types::{ExtractedField, ExtractionMethod, ScanResult};

/// Inclusive digit-count bounds for anything accepted as an account number.
pub const ACCOUNT_NUMBER_DIGITS: std::ops::RangeInclusive<usize> = 8..=20;

const MIN_LABELED_NAME_LEN: usize = 3;
const MIN_NAME_LINE_LETTERS: usize = 6;
const MAX_NAME_LINE_DIGITS: usize = 2;

// ── Public extraction API ─────────────────────────────────────────────────────

/// Payment-proof field extractor, built once from an [`ExtractorConfig`].
///
/// Holds no per-scan state; a single instance can serve any number of scans
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    bank_labels: LabelSet,
    account_number_labels: LabelSet,
    account_name_labels: LabelSet,
    bank_gazetteer: Vec<String>,
    qr_noise: Vec<String>,
    name_region: NameRegion,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        let folded = |list: &[String]| -> Vec<String> {
            list.iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };
        Self {
            bank_labels: LabelSet::new(&config.bank_labels),
            account_number_labels: LabelSet::new(&config.account_number_labels),
            account_name_labels: LabelSet::new(&config.account_name_labels),
            bank_gazetteer: folded(&config.bank_gazetteer),
            qr_noise: folded(&config.qr_noise),
            name_region: config.name_region,
        }
    }

    pub fn name_region(&self) -> &NameRegion {
        &self.name_region
    }

    /// Normalize raw OCR text and resolve bank, account number and account name.
    pub fn scan(&self, raw_text: &str) -> ScanResult {
        let text = normalize::normalize(raw_text);

        let bank = resolve_bank_name(&text, &self.bank_labels, &self.bank_gazetteer);
        let number = resolve_account_number(&text, &self.account_number_labels);
        let name = resolve_account_name(&text, &self.account_name_labels);

        for (field, value) in report::Field::ALL.iter().zip([&bank, &number, &name]) {
            match value {
                Some(f) => tracing::debug!(%field, method = ?f.method, "field resolved"),
                None => tracing::debug!(%field, "field unresolved"),
            }
        }

        report::assemble(text, bank, number, name)
    }

    /// Clean OCR text read from the name band of a QR screenshot.
    pub fn display_name(&self, region_text: &str) -> Option<String> {
        name_region::clean_display_name(region_text, &self.qr_noise)
    }
}

// ── Bank name ────────────────────────────────────────────────────────────────

/// Labeled value first, then the first gazetteer entry found anywhere.
///
/// Gazetteer entries must already be lowercase. Declaration order decides
/// between overlapping names, not match length.
pub fn resolve_bank_name(
    text: &str,
    labels: &LabelSet,
    gazetteer: &[String],
) -> Option<ExtractedField> {
    if let Some(c) = find_value_after_labels(text, labels) {
        return ExtractedField::new(c.value.trim(), c.method);
    }

    let low = text.to_lowercase();
    gazetteer
        .iter()
        .find(|kw| low.contains(kw.as_str()))
        .and_then(|kw| ExtractedField::new(title_case(kw), ExtractionMethod::Gazetteer))
}

/// Uppercase each letter that follows a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = ch.is_alphabetic();
    }
    out
}

// ── Account number ───────────────────────────────────────────────────────────

/// Labeled value reduced to its digits, else the longest bare digit run.
///
/// The fallback removes spaces before looking for runs, so `"1234 5678"`
/// counts as one eight-digit run. Two unrelated groups separated only by a
/// space merge the same way.
pub fn resolve_account_number(text: &str, labels: &LabelSet) -> Option<ExtractedField> {
    if let Some(c) = find_value_after_labels(text, labels) {
        let digits: String = c.value.chars().filter(char::is_ascii_digit).collect();
        if ACCOUNT_NUMBER_DIGITS.contains(&digits.len()) {
            return ExtractedField::new(digits, c.method);
        }
    }

    let compact = text.replace(' ', "");
    digit_runs(&compact)
        .into_iter()
        .filter(|run| ACCOUNT_NUMBER_DIGITS.contains(&run.len()))
        // Longest wins; the earlier run is kept on a tie.
        .fold(None::<&str>, |best, run| match best {
            Some(b) if b.len() >= run.len() => Some(b),
            _ => Some(run),
        })
        .and_then(|run| ExtractedField::new(run, ExtractionMethod::DigitRun))
}

/// Maximal runs of ASCII digits, each bounded by a non-digit or a string edge.
fn digit_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, ch) in s.char_indices() {
        match (ch.is_ascii_digit(), start) {
            (true, None) => start = Some(i),
            (false, Some(st)) => {
                runs.push(&s[st..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(st) = start {
        runs.push(&s[st..]);
    }
    runs
}

// ── Account name ─────────────────────────────────────────────────────────────

/// Labeled value with OCR debris stripped, else the most letter-heavy line.
pub fn resolve_account_name(text: &str, labels: &LabelSet) -> Option<ExtractedField> {
    if let Some(c) = find_value_after_labels(text, labels) {
        let cleaned: String = c.value.chars().filter(|&ch| is_name_char(ch)).collect();
        let cleaned = cleaned.trim();
        if cleaned.chars().count() >= MIN_LABELED_NAME_LEN {
            return ExtractedField::new(cleaned, c.method);
        }
    }

    let mut best: Option<&str> = None;
    let mut best_score = 0i64;
    for line in normalize::lines(text) {
        let letters = line.chars().filter(|c| c.is_alphabetic()).count();
        let digits = line.chars().filter(char::is_ascii_digit).count();
        if letters < MIN_NAME_LINE_LETTERS || digits > MAX_NAME_LINE_DIGITS {
            continue;
        }
        let score = letters as i64 - digits as i64;
        if score > best_score {
            best_score = score;
            best = Some(line);
        }
    }
    best.and_then(|line| ExtractedField::new(line, ExtractionMethod::LineScore))
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '@' | '&' | '.' | '\'' | '-')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
