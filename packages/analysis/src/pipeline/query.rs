//! Search query derivation from product attributes.

use crate::types::product::ProductAttributes;

/// Fixed prefix every product query starts with.
pub const QUERY_PREFIX: &str = "nutrition facts, ingredients for ";

/// How many visible-text tokens the last-resort fallback uses.
const VISIBLE_TEXT_TOKENS: usize = 4;

/// Build the canonical search query for a product.
///
/// Precedence, first non-empty wins:
/// 1. brand + product name
/// 2. barcode
/// 3. first four visible-text fragments
/// 4. empty (the query degrades to the bare prefix)
///
/// Pure and deterministic; never fails.
pub fn build_query(attrs: &ProductAttributes) -> String {
    let named = [attrs.brand.as_deref(), attrs.product_name.as_deref()]
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let base = if !named.is_empty() {
        named
    } else if let Some(barcode) = attrs
        .barcode
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
    {
        barcode.to_string()
    } else {
        attrs
            .visible_text
            .iter()
            .take(VISIBLE_TEXT_TOKENS)
            .map(|t| t.trim())
            .collect::<Vec<_>>()
            .join(" ")
    };

    format!("{QUERY_PREFIX}{base}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_and_name_win() {
        let attrs = ProductAttributes::new()
            .with_brand("Acme")
            .with_product_name("Bar")
            .with_barcode("012345");
        assert_eq!(build_query(&attrs), "nutrition facts, ingredients for Acme Bar");
    }

    #[test]
    fn test_name_alone() {
        let attrs = ProductAttributes::new().with_product_name("Protein Bar");
        assert_eq!(
            build_query(&attrs),
            "nutrition facts, ingredients for Protein Bar"
        );
    }

    #[test]
    fn test_barcode_fallback() {
        let attrs = ProductAttributes::new().with_barcode("012345");
        assert_eq!(build_query(&attrs), "nutrition facts, ingredients for 012345");
    }

    #[test]
    fn test_visible_text_uses_first_four_tokens() {
        let attrs = ProductAttributes::new().with_visible_text(["A", "B", "C", "D", "E"]);
        assert_eq!(build_query(&attrs), "nutrition facts, ingredients for A B C D");
    }

    #[test]
    fn test_empty_attributes_degrade_to_prefix() {
        let attrs = ProductAttributes::default();
        assert_eq!(build_query(&attrs), "nutrition facts, ingredients for");
    }

    #[test]
    fn test_whitespace_only_parts_are_skipped() {
        let attrs = ProductAttributes::new()
            .with_brand("   ")
            .with_product_name("Bar");
        assert_eq!(build_query(&attrs), "nutrition facts, ingredients for Bar");
    }

    #[test]
    fn test_deterministic() {
        let attrs = ProductAttributes::new().with_brand("Acme");
        assert_eq!(build_query(&attrs), build_query(&attrs));
    }
}
