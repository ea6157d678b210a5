//! Filing identifier and reference types.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// SEC accession number identifying a single filing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct AccessionNumber(pub String);

impl AccessionNumber {
    /// Create a new accession number.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the accession number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccessionNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccessionNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Descriptive reference to a historical filing, as surfaced next to
/// predictions and scatter points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingRef {
    /// Company name.
    #[serde(rename = "CoName")]
    pub co_name: String,
    /// Filing date formatted `YYYY-MM-DD`.
    #[serde(rename = "FILING_DATE")]
    pub filing_date: String,
    /// Accession number.
    #[serde(rename = "ACC_NUM")]
    pub acc_num: AccessionNumber,
    /// Realized 30-day excess return.
    #[serde(rename = "ExcessRet")]
    pub excess_ret: f64,
    /// Text-complexity score.
    #[serde(rename = "CCTI")]
    pub ccti: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accession_from_str() {
        let acc: AccessionNumber = "0000320193-23-000106".into();
        assert_eq!(acc.as_str(), "0000320193-23-000106");
        assert_eq!(acc.to_string(), "0000320193-23-000106");
    }

    #[test]
    fn filing_ref_serializes_with_dataset_column_names() {
        let filing = FilingRef {
            co_name: "ACME CORP".to_string(),
            filing_date: "2020-03-31".to_string(),
            acc_num: AccessionNumber::new("0001-20-000001"),
            excess_ret: -0.0123,
            ccti: 2.5,
        };
        let json = serde_json::to_value(&filing).unwrap();
        assert_eq!(json["CoName"], "ACME CORP");
        assert_eq!(json["ACC_NUM"], "0001-20-000001");
        assert_eq!(json["CCTI"], 2.5);
    }
}
