//! Recovering structure from free-form model replies.
//!
//! LLM replies routinely wrap their JSON payload in prose. The span
//! heuristic here takes the leftmost `{` through the rightmost `}` and
//! parses that single greedy span. It does not attempt balanced-brace
//! matching: that tolerates commentary around the payload, at the cost
//! of breaking when unrelated braces appear outside it. Callers rely on
//! this permissiveness; do not tighten it.

use serde_json::Value;

use crate::error::{AnalysisError, Result};
use crate::types::product::ProductAttributes;
use crate::types::report::REQUIRED_REPORT_FIELDS;

/// Extract the first syntactically valid JSON object embedded in text.
///
/// Pure and idempotent. No schema validation happens here; shape checks
/// belong to the caller.
pub fn extract_json(text: &str) -> Result<Value> {
    let start = text.find('{').ok_or(AnalysisError::NoJsonFound)?;
    let end = text.rfind('}').ok_or(AnalysisError::NoJsonFound)?;
    if end < start {
        return Err(AnalysisError::NoJsonFound);
    }

    serde_json::from_str(&text[start..=end]).map_err(AnalysisError::MalformedJson)
}

/// Parse a vision reply into product attributes.
///
/// The reply is expected to embed a JSON object; unknown fields are
/// ignored and missing ones default (see [`ProductAttributes`]).
pub fn parse_product_attributes(raw: &str) -> Result<ProductAttributes> {
    let value = extract_json(raw)?;
    serde_json::from_value(value).map_err(AnalysisError::MalformedJson)
}

/// Check that a synthesized report has the expected top-level shape.
///
/// Field presence only; everything below the required keys stays opaque.
pub fn validate_report(value: Value) -> Result<Value> {
    let object = value
        .as_object()
        .ok_or_else(|| AnalysisError::ReportShape {
            field: "<root object>".to_string(),
        })?;

    for field in REQUIRED_REPORT_FIELDS {
        if !object.contains_key(*field) {
            return Err(AnalysisError::ReportShape {
                field: (*field).to_string(),
            });
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_plain_object() {
        let value = extract_json(r#"{"brand": "Acme"}"#).unwrap();
        assert_eq!(value, json!({"brand": "Acme"}));
    }

    #[test]
    fn test_extract_json_surrounded_by_prose() {
        let text = r#"Sure! Here is the JSON you asked for:
            {"brand": "Acme", "confidence": "high"}
            Let me know if you need anything else."#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["brand"], "Acme");
    }

    #[test]
    fn test_extract_json_no_braces() {
        let err = extract_json("no json here").unwrap_err();
        assert!(matches!(err, AnalysisError::NoJsonFound));
    }

    #[test]
    fn test_extract_json_close_before_open() {
        let err = extract_json("} and later {").unwrap_err();
        assert!(matches!(err, AnalysisError::NoJsonFound));
    }

    #[test]
    fn test_extract_json_malformed_span() {
        let err = extract_json(r#"{"brand": }"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedJson(_)));
    }

    #[test]
    fn test_extract_json_greedy_span_breaks_on_stray_braces() {
        // Greedy first-{/last-} takes both objects as one span, which is
        // not valid JSON. This is the documented trade-off.
        let text = r#"config {a} then payload {"brand": "Acme"}"#;
        let err = extract_json(text).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedJson(_)));
    }

    #[test]
    fn test_extract_json_idempotent() {
        let text = r#"prefix {"x": 1} suffix"#;
        let first = extract_json(text).unwrap();
        let second = extract_json(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_product_attributes() {
        let raw = r#"The label reads: {"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#;
        let attrs = parse_product_attributes(raw).unwrap();
        assert_eq!(attrs.brand.as_deref(), Some("Acme"));
        assert_eq!(attrs.product_name.as_deref(), Some("Protein Bar"));
        assert!(attrs.visible_text.is_empty());
    }

    #[test]
    fn test_validate_report_accepts_full_shape() {
        let report = json!({
            "product": {"name": "Acme Bar"},
            "nutrition_facts": {"calories": 200},
            "ingredients": [],
            "hormone_impact": {"overall_score": 6}
        });
        assert!(validate_report(report).is_ok());
    }

    #[test]
    fn test_validate_report_rejects_missing_field() {
        let report = json!({
            "product": {},
            "nutrition_facts": {},
            "ingredients": []
        });
        let err = validate_report(report).unwrap_err();
        match err {
            AnalysisError::ReportShape { field } => assert_eq!(field, "hormone_impact"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_report_rejects_non_object() {
        let err = validate_report(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, AnalysisError::ReportShape { .. }));
    }
}
