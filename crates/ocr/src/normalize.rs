//! Canonical line-oriented form of raw OCR output.

/// Fold CR to LF, squeeze runs of spaces/tabs to one space, trim the document.
///
/// Line order is preserved and the function is idempotent.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;
    for ch in raw.chars() {
        match ch {
            ' ' | '\t' => {
                if !in_run {
                    out.push(' ');
                    in_run = true;
                }
            }
            '\r' => {
                out.push('\n');
                in_run = false;
            }
            other => {
                out.push(other);
                in_run = false;
            }
        }
    }
    out.trim().to_string()
}

/// Non-blank lines of `text`, trimmed, in original order.
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Replace every whitespace run (newlines included) with a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squeezes_spaces_and_tabs() {
        assert_eq!(normalize("Bank  \t Name:\t\tCIMB"), "Bank Name: CIMB");
    }

    #[test]
    fn folds_carriage_returns() {
        assert_eq!(normalize("a\rb"), "a\nb");
        // CRLF becomes an empty line; blank lines are dropped by `lines`.
        assert_eq!(normalize("a\r\nb"), "a\n\nb");
        assert_eq!(lines(&normalize("a\r\nb")), ["a", "b"]);
    }

    #[test]
    fn trims_document_not_inner_lines() {
        assert_eq!(normalize("  \n  hello \n world  \n"), "hello \n world");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "   ",
            "Maybank2u\r\n\r\nAccount  Number :\t1234 5678 9012\n  JOHN   TAN  ",
            "\t\tline one\r\rline two\t",
            "TOUCH 'N GO  EWALLET\n\n\nAHMAD BIN ALI",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn lines_skip_blank_and_trim() {
        assert_eq!(lines("  a \n\n \n b"), ["a", "b"]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn collapse_whitespace_joins_lines() {
        assert_eq!(collapse_whitespace("  TOUCH 'N GO\n\tAHMAD  "), "TOUCH 'N GO AHMAD");
    }
}
