use crate::types::{ExtractedField, ScanResult};

/// The three payment-proof fields, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BankName,
    AccountNumber,
    AccountName,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::BankName, Field::AccountNumber, Field::AccountName];

    pub fn missing_note(self) -> &'static str {
        match self {
            Field::BankName => "Bank not confidently detected.",
            Field::AccountNumber => "Account number not confidently detected.",
            Field::AccountName => "Account name not confidently detected.",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::BankName => write!(f, "bank_name"),
            Field::AccountNumber => write!(f, "account_number"),
            Field::AccountName => write!(f, "account_name"),
        }
    }
}

/// Assemble the final result, adding a note for every unresolved field.
pub fn assemble(
    normalized_text: String,
    bank_name: Option<ExtractedField>,
    account_number: Option<ExtractedField>,
    account_name: Option<ExtractedField>,
) -> ScanResult {
    let confidence_notes = Field::ALL
        .iter()
        .zip([&bank_name, &account_number, &account_name])
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| field.missing_note().to_string())
        .collect();

    ScanResult {
        bank_name: bank_name.map(|f| f.value),
        account_number: account_number.map(|f| f.value),
        account_name: account_name.map(|f| f.value),
        raw_text: normalized_text,
        confidence_notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractionMethod;

    fn field(v: &str) -> Option<ExtractedField> {
        ExtractedField::new(v, ExtractionMethod::SameLine)
    }

    #[test]
    fn all_missing_gives_three_notes_in_order() {
        let r = assemble(String::new(), None, None, None);
        assert_eq!(
            r.confidence_notes,
            [
                "Bank not confidently detected.",
                "Account number not confidently detected.",
                "Account name not confidently detected.",
            ]
        );
    }

    #[test]
    fn resolved_fields_get_no_note() {
        let r = assemble("text".into(), field("Cimb"), None, field("JOHN TAN"));
        assert_eq!(r.confidence_notes, ["Account number not confidently detected."]);
        assert_eq!(r.bank_name.as_deref(), Some("Cimb"));
        assert_eq!(r.account_name.as_deref(), Some("JOHN TAN"));
        assert_eq!(r.raw_text, "text");
    }

    #[test]
    fn complete_result_has_no_notes() {
        let r = assemble(String::new(), field("a"), field("12345678"), field("abc"));
        assert!(r.confidence_notes.is_empty());
    }
}
