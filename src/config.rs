use std::{fs, path::PathBuf};

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::errors::{InvalidConfig, InvalidIsoCurrencyCode, ReadError};

/// Bill store settings. Every field has a default, so a configuration file only
/// needs to mention what it overrides:
///
/// ```ron
/// (
///     storage_dir: "/var/lib/tabtogether",
///     currency: "EUR",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize)]
#[serde(default)]
pub struct BillStoreConfig {
    /// Directory holding the file-backed key-value slots.
    pub storage_dir: PathBuf,
    /// Slot holding the bill collection.
    pub bills_key: String,
    /// Reserved for user settings; nothing reads or writes it yet.
    pub settings_key: String,
    /// ISO 4217 code used when printing amounts.
    pub currency: String,
}

impl Default for BillStoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".tabtogether"),
            bills_key: "@TabTogether:bills".to_string(),
            settings_key: "@TabTogether:settings".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl BillStoreConfig {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Default::default()
        }
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        ron::from_str(s).map_err(|e| InvalidConfig::with_debug(&e))
    }

    pub fn from_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| ReadError::with_debug(&path.display().to_string(), &e))?;
        Self::from_ron_str(&s)
    }

    pub fn currency(&self) -> Result<Currency, ServerError> {
        Currency::from_code(&self.currency).ok_or_else(|| InvalidIsoCurrencyCode::new(&self.currency))
    }
}
