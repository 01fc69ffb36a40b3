use serde::Serialize;
use std::collections::HashMap;

/// One row of input data for a single official.
///
/// Indicator values are keyed by indicator name. A missing key means the value
/// was absent in the source, which is not the same as a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OfficialRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub indicators: HashMap<String, f64>,
    pub income: Option<f64>,    // Total declared income
    pub net_worth: Option<f64>, // Total declared net worth
}

impl OfficialRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, role: impl Into<String>) -> Self {
        self.name = name.into();
        self.role = role.into();
        self
    }

    pub fn with_indicator(mut self, name: impl Into<String>, value: f64) -> Self {
        self.indicators.insert(name.into(), value);
        self
    }

    pub fn with_financials(mut self, income: Option<f64>, net_worth: Option<f64>) -> Self {
        self.income = income;
        self.net_worth = net_worth;
        self
    }

    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied()
    }

    pub fn set_indicator(&mut self, name: &str, value: f64) {
        self.indicators.insert(name.to_string(), value);
    }

    /// Both financial fields are present
    pub fn has_financials(&self) -> bool {
        self.income.is_some() && self.net_worth.is_some()
    }

    /// Name to show in lists, falling back to the identifier
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_indicator_is_none() {
        let record = OfficialRecord::new("7").with_indicator("DENUNCIAS_SCORE", 0.0);
        assert_eq!(record.indicator("DENUNCIAS_SCORE"), Some(0.0));
        assert_eq!(record.indicator("TRANSFUGUISMO"), None);
    }

    #[test]
    fn test_has_financials_requires_both() {
        let record = OfficialRecord::new("1").with_financials(Some(100.0), None);
        assert!(!record.has_financials());

        let record = OfficialRecord::new("1").with_financials(Some(100.0), Some(0.0));
        assert!(record.has_financials());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let record = OfficialRecord::new("A-12");
        assert_eq!(record.display_name(), "A-12");

        let record = record.with_name("Ana Ruiz", "Mayor");
        assert_eq!(record.display_name(), "Ana Ruiz");
    }
}
