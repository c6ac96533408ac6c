use crate::normalize;
use crate::types::ExtractionMethod;

/// Case-folded aliases for one semantic field.
///
/// Matching is a plain substring test, so a short alias such as `"to"` also
/// hits inside longer words ("total", "photo").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// True if any alias occurs anywhere in `line` (case-insensitive).
    pub fn matches(&self, line: &str) -> bool {
        let low = line.to_lowercase();
        self.labels.iter().any(|l| low.contains(l.as_str()))
    }

    /// True if `text` is exactly one of the aliases, ignoring case and padding.
    pub fn is_label(&self, text: &str) -> bool {
        let low = text.trim().to_lowercase();
        self.labels.iter().any(|l| *l == low)
    }
}

/// A value found next to a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCandidate {
    pub value: String,
    /// Index into the non-blank lines of the text.
    pub line_index: usize,
    pub method: ExtractionMethod,
}

/// Locate the value that belongs to the first line mentioning one of `labels`.
///
/// The value is whatever follows the first `:` or `-` on that line, or else the
/// next non-blank line provided it is not itself a label. A labeled line that
/// yields neither is skipped and the scan moves on. The first hit is returned;
/// later, possibly better, candidates are never considered.
pub fn find_value_after_labels(text: &str, labels: &LabelSet) -> Option<ExtractionCandidate> {
    let lines = normalize::lines(text);

    for (i, line) in lines.iter().enumerate() {
        if !labels.matches(line) {
            continue;
        }

        if let Some((_, rest)) = line.split_once([':', '-']) {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Some(ExtractionCandidate {
                    value: rest.to_string(),
                    line_index: i,
                    method: ExtractionMethod::SameLine,
                });
            }
        }

        if let Some(next) = lines.get(i + 1) {
            if !labels.is_label(next) {
                return Some(ExtractionCandidate {
                    value: next.trim().to_string(),
                    line_index: i + 1,
                    method: ExtractionMethod::NextLine,
                });
            }
        }
    }
    None
}
