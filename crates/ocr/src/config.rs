use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BANK_LABELS: &[&str] = &["bank", "bank name"];

pub const DEFAULT_ACCOUNT_NUMBER_LABELS: &[&str] = &[
    "account number",
    "acc no",
    "acct no",
    "a/c no",
    "no akaun",
    "akaun",
    "account no",
    "acc number",
];

pub const DEFAULT_ACCOUNT_NAME_LABELS: &[&str] =
    &["account name", "name", "beneficiary", "recipient", "to", "payee"];

/// Known Malaysian banks, searched in this order.
pub const DEFAULT_BANK_GAZETTEER: &[&str] = &[
    "maybank",
    "cimb",
    "public bank",
    "hong leong",
    "rhb",
    "ambank",
    "hsbc",
    "uob",
    "ocbc",
    "bank islam",
    "bank rakyat",
    "affin",
    "alliance",
    "standard chartered",
];

/// Wallet and app branding printed around the name on QR display screens.
pub const DEFAULT_QR_NOISE: &[&str] = &[
    "touch 'n go",
    "ewallet",
    "malaysia national qr",
    "scan with any",
    "banking apps",
    "transfer money",
    "pay",
    "duitnow",
    "qr",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Fractions of the screenshot that hold the account holder's display name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameRegion {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for NameRegion {
    fn default() -> Self {
        // Top-center band above the QR code.
        Self { top: 0.10, bottom: 0.40, left: 0.10, right: 0.90 }
    }
}

/// Every alias list and gazetteer the resolvers consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub bank_labels: Vec<String>,
    pub account_number_labels: Vec<String>,
    pub account_name_labels: Vec<String>,
    pub bank_gazetteer: Vec<String>,
    pub qr_noise: Vec<String>,
    pub name_region: NameRegion,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            bank_labels: owned(DEFAULT_BANK_LABELS),
            account_number_labels: owned(DEFAULT_ACCOUNT_NUMBER_LABELS),
            account_name_labels: owned(DEFAULT_ACCOUNT_NAME_LABELS),
            bank_gazetteer: owned(DEFAULT_BANK_GAZETTEER),
            qr_noise: owned(DEFAULT_QR_NOISE),
            name_region: NameRegion::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parse a TOML override; keys that are absent keep their defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("bank_labels", &self.bank_labels),
            ("account_number_labels", &self.account_number_labels),
            ("account_name_labels", &self.account_name_labels),
            ("bank_gazetteer", &self.bank_gazetteer),
            ("qr_noise", &self.qr_noise),
        ];
        for (name, list) in lists {
            if let Some(pos) = list.iter().position(|s| s.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("{name}[{pos}] is blank")));
            }
        }

        let r = &self.name_region;
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_unit(r.top) && in_unit(r.bottom) && r.top < r.bottom) {
            return Err(ConfigError::Invalid(format!(
                "name_region rows {}..{} out of range",
                r.top, r.bottom
            )));
        }
        if !(in_unit(r.left) && in_unit(r.right) && r.left < r.right) {
            return Err(ConfigError::Invalid(format!(
                "name_region columns {}..{} out of range",
                r.left, r.right
            )));
        }
        Ok(())
    }
}
