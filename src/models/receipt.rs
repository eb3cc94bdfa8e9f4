//! Receipt analysis model
//!
//! Best-effort extraction returned by the external vision service for a
//! photographed receipt. Every field may be missing.

use serde::{Deserialize, Serialize};
use crate::utils::errors::Result;
use crate::utils::helpers::MAX_AMOUNT;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptAnalysis {
    pub total_amount: Option<f64>,
    pub merchant: Option<String>,
    /// Category hint such as `alimentacao` or `transporte`
    pub suggested_category: Option<String>,
    pub confidence: f64,
    /// Set when the service could not read the receipt
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Good,
    Low,
}

impl ReceiptAnalysis {
    /// Parse the JSON document returned by the vision service
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        if self.confidence >= 0.8 {
            ConfidenceLevel::High
        } else if self.confidence >= 0.6 {
            ConfidenceLevel::Good
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Total amount if it is usable for an expense
    pub fn usable_amount(&self) -> Option<f64> {
        self.total_amount
            .filter(|amount| amount.is_finite() && *amount > 0.0 && *amount <= MAX_AMOUNT)
    }

    /// Category names to look for, most specific first
    pub fn category_candidates(&self) -> &'static [&'static str] {
        match self.suggested_category.as_deref().map(str::to_lowercase).as_deref() {
            Some("alimentacao") => &["Alimentação", "Comida", "Restaurante"],
            Some("transporte") => &["Transporte", "Combustível", "Uber"],
            Some("casa") => &["Casa", "Moradia", "Lar"],
            Some("saude") => &["Saúde", "Farmácia", "Médico"],
            Some("lazer") => &["Lazer", "Entretenimento", "Diversão"],
            _ => &["Outros", "Diversos"],
        }
    }
}

impl ConfidenceLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "🟢",
            ConfidenceLevel::Good => "🟡",
            ConfidenceLevel::Low => "🔴",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "Alta",
            ConfidenceLevel::Good => "Boa",
            ConfidenceLevel::Low => "Baixa",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_levels() {
        let mut analysis = ReceiptAnalysis { confidence: 0.85, ..Default::default() };
        assert_eq!(analysis.confidence_level(), ConfidenceLevel::High);
        analysis.confidence = 0.6;
        assert_eq!(analysis.confidence_level(), ConfidenceLevel::Good);
        analysis.confidence = 0.2;
        assert_eq!(analysis.confidence_level(), ConfidenceLevel::Low);
    }

    #[test]
    fn test_category_candidates() {
        let analysis = ReceiptAnalysis {
            suggested_category: Some("Transporte".to_string()),
            ..Default::default()
        };
        assert_eq!(analysis.category_candidates()[0], "Transporte");
        assert_eq!(ReceiptAnalysis::default().category_candidates()[0], "Outros");
    }

    #[test]
    fn test_from_json() {
        let analysis = ReceiptAnalysis::from_json(
            r#"{"total_amount": 42.5, "merchant": "Padaria", "confidence": 0.7}"#,
        ).unwrap();
        assert_eq!(analysis.total_amount, Some(42.5));
        assert_eq!(analysis.merchant.as_deref(), Some("Padaria"));
        assert_eq!(analysis.suggested_category, None);
        assert_eq!(analysis.confidence_level(), ConfidenceLevel::Good);

        assert!(ReceiptAnalysis::from_json("not json").is_err());
    }

    #[test]
    fn test_usable_amount() {
        let analysis = ReceiptAnalysis { total_amount: Some(0.0), ..Default::default() };
        assert_eq!(analysis.usable_amount(), None);
        let analysis = ReceiptAnalysis { total_amount: Some(18.9), ..Default::default() };
        assert_eq!(analysis.usable_amount(), Some(18.9));
        let analysis = ReceiptAnalysis { total_amount: Some(1e12), ..Default::default() };
        assert_eq!(analysis.usable_amount(), None);
    }
}
