//! Product attributes recovered from the label photo.

use serde::{Deserialize, Serialize};

/// How confident the vision call was in its reading of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    /// The safe default when vision output could not be parsed.
    #[default]
    Low,
}

/// Attributes of a packaged product as read off its label.
///
/// Produced by the vision call. Every field is optional except
/// `visible_text` (possibly empty) and `confidence`; a malformed vision
/// reply degrades to `ProductAttributes::default()` rather than aborting
/// the pipeline. Immutable once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductAttributes {
    /// Product name as printed on the package
    #[serde(default)]
    pub product_name: Option<String>,

    /// Brand name
    #[serde(default)]
    pub brand: Option<String>,

    /// Net weight / volume statement (e.g. "500g")
    #[serde(default)]
    pub net_weight: Option<String>,

    /// Barcode digits if legible
    #[serde(default)]
    pub barcode: Option<String>,

    /// Any other text fragments visible on the package
    #[serde(default)]
    pub visible_text: Vec<String>,

    /// Vision confidence in the reading
    #[serde(default)]
    pub confidence: Confidence,
}

impl ProductAttributes {
    /// Create empty attributes (all unknown, low confidence).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the product name.
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the net weight.
    pub fn with_net_weight(mut self, weight: impl Into<String>) -> Self {
        self.net_weight = Some(weight.into());
        self
    }

    /// Set the barcode.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Set the visible text fragments.
    pub fn with_visible_text(
        mut self,
        text: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.visible_text = text.into_iter().map(|t| t.into()).collect();
        self
    }

    /// Set the confidence level.
    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// True when nothing usable was read off the label.
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.brand.is_none()
            && self.barcode.is_none()
            && self.visible_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_safe() {
        let attrs = ProductAttributes::default();
        assert!(attrs.is_empty());
        assert_eq!(attrs.confidence, Confidence::Low);
    }

    #[test]
    fn test_deserialize_partial_object() {
        let attrs: ProductAttributes =
            serde_json::from_str(r#"{"brand": "Acme", "visible_text": ["Protein"]}"#).unwrap();
        assert_eq!(attrs.brand.as_deref(), Some("Acme"));
        assert!(attrs.product_name.is_none());
        assert_eq!(attrs.visible_text, vec!["Protein"]);
        assert_eq!(attrs.confidence, Confidence::Low);
    }

    #[test]
    fn test_confidence_serde_lowercase() {
        let attrs: ProductAttributes =
            serde_json::from_str(r#"{"confidence": "high"}"#).unwrap();
        assert_eq!(attrs.confidence, Confidence::High);
    }
}
