//! LLM prompts for the analysis pipeline.
//!
//! Prompt text is configuration, not behavior: the pipeline only relies
//! on the JSON shapes these prompts instruct the models to produce.

/// Prompt for the vision call that reads the product label.
pub const VISION_PROMPT: &str = r#"Look at this photo of a packaged food product and read its label.

Output JSON only:
{
    "product_name": "product name as printed, or null if not visible",
    "brand": "brand name, or null",
    "net_weight": "net weight / volume statement, or null",
    "barcode": "barcode digits if legible, or null",
    "visible_text": ["other text fragments visible on the package"],
    "confidence": "high" | "medium" | "low"
}

Transcribe exactly what is printed. Do not guess values you cannot see;
use null for anything illegible and lower your confidence accordingly."#;

/// System prompt for the synthesis call.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are a nutrition analyst specializing in \
ingredient safety and endocrine (hormonal) impact. You ground every statement in the \
provided material and say so when the material is insufficient.";

/// User prompt template for the synthesis call.
///
/// Placeholders: `{attributes}` (the product attributes as JSON) and
/// `{context}` (the formatted search/page context block).
pub const SYNTHESIS_USER_PROMPT: &str = r#"Analyze this packaged food product.

Product attributes read from the label:
{attributes}

Gathered web context:
{context}

Produce a single JSON object with exactly this top-level structure:
{
    "product": {
        "name": "...",
        "brand": "...",
        "category": "..."
    },
    "nutrition_facts": {
        "serving_size": "...",
        "calories": 0,
        "macronutrients": { "protein_g": 0, "carbohydrates_g": 0, "fat_g": 0, "sugar_g": 0 },
        "notable_micronutrients": []
    },
    "ingredients": [
        {
            "name": "...",
            "purpose": "...",
            "hormone_impact": "description of endocrine relevance, or \"none known\"",
            "risk_level": "low" | "moderate" | "high"
        }
    ],
    "hormone_impact": {
        "overall_score": 0,
        "concerns": [],
        "endocrine_disruptors": []
    },
    "summary": "..."
}

Every top-level field must be present. Output the JSON object only, with no
surrounding commentary."#;

/// Fill the synthesis user prompt template.
pub fn format_synthesis_prompt(attributes_json: &str, context: &str) -> String {
    SYNTHESIS_USER_PROMPT
        .replace("{attributes}", attributes_json)
        .replace("{context}", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_synthesis_prompt_fills_placeholders() {
        let prompt = format_synthesis_prompt(r#"{"brand":"Acme"}"#, "CONTEXT BLOCK");
        assert!(prompt.contains(r#"{"brand":"Acme"}"#));
        assert!(prompt.contains("CONTEXT BLOCK"));
        assert!(!prompt.contains("{attributes}"));
        assert!(!prompt.contains("{context}"));
    }

    #[test]
    fn test_synthesis_prompt_names_required_fields() {
        for field in crate::types::report::REQUIRED_REPORT_FIELDS {
            assert!(
                SYNTHESIS_USER_PROMPT.contains(field),
                "prompt must instruct the model to emit {field}"
            );
        }
    }
}
