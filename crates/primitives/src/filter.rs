//! Filter specification for subsetting the filing dataset.

use serde::{Deserialize, Serialize};

use crate::Date;

/// Optional predicates selecting a subset of filings.
///
/// Every dimension is optional; an absent field means "no constraint".
/// An explicitly empty selection set is normalized to "no constraint" as
/// well, so a cleared multiselect in the UI can never produce an
/// accidentally empty intersection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Earliest filing date, inclusive.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Latest filing date, inclusive.
    #[serde(default)]
    pub end_date: Option<Date>,
    /// SIC industry codes to keep. The source data carries SIC as a float
    /// column, so the selection is float-typed too.
    #[serde(default)]
    pub sics: Option<Vec<f64>>,
    /// Form types to keep.
    #[serde(default)]
    pub forms: Option<Vec<String>>,
    /// Market-regime flags to keep (0 = expansion, 1 = recession).
    #[serde(default)]
    pub market_conditions: Option<Vec<i64>>,
}

impl FilterSpec {
    /// A spec with no constraints; filtering with it returns every row.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self { start_date: None, end_date: None, sics: None, forms: None, market_conditions: None }
    }

    /// SIC selection, with empty normalized to `None`.
    #[must_use]
    pub fn sic_selection(&self) -> Option<&[f64]> {
        normalize(self.sics.as_deref())
    }

    /// Form-type selection, with empty normalized to `None`.
    #[must_use]
    pub fn form_selection(&self) -> Option<&[String]> {
        normalize(self.forms.as_deref())
    }

    /// Regime selection, with empty normalized to `None`.
    #[must_use]
    pub fn condition_selection(&self) -> Option<&[i64]> {
        normalize(self.market_conditions.as_deref())
    }

    /// Whether this spec constrains any dimension at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.sic_selection().is_none()
            && self.form_selection().is_none()
            && self.condition_selection().is_none()
    }
}

fn normalize<T>(selection: Option<&[T]>) -> Option<&[T]> {
    selection.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_means_no_constraint() {
        let spec = FilterSpec { sics: Some(vec![]), forms: Some(vec![]), ..Default::default() };
        assert!(spec.sic_selection().is_none());
        assert!(spec.form_selection().is_none());
        assert!(spec.is_unconstrained());
    }

    #[test]
    fn populated_selection_is_kept() {
        let spec = FilterSpec { sics: Some(vec![6021.0, 7372.0]), ..Default::default() };
        assert_eq!(spec.sic_selection(), Some([6021.0, 7372.0].as_slice()));
        assert!(!spec.is_unconstrained());
    }

    #[test]
    fn deserializes_from_partial_json() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"start_date": "2019-01-01", "forms": ["10-K"]}"#).unwrap();
        assert_eq!(spec.start_date, Date::from_ymd_opt(2019, 1, 1));
        assert_eq!(spec.form_selection(), Some(["10-K".to_string()].as_slice()));
        assert!(spec.end_date.is_none());
        assert!(spec.sic_selection().is_none());
    }

    #[test]
    fn unconstrained_round_trips() {
        let spec = FilterSpec::unconstrained();
        let json = serde_json::to_string(&spec).unwrap();
        let back: FilterSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
