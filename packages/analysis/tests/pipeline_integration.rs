//! End-to-end pipeline tests over mock services.
//!
//! No network access: every external seam is a mock from
//! `analysis::testing`, and all courtesy delays are zeroed.

use analysis::testing::{
    MockContentFetcher, MockSearchProvider, MockSynthesisService, MockVisionService,
};
use analysis::{
    AnalysisError, AnalysisOutcome, AnalysisPipeline, PipelineConfig, SearchResult,
};

const PRIMARY_QUERY: &str = "nutrition facts, ingredients for Acme Protein Bar";

fn config() -> PipelineConfig {
    PipelineConfig::default().without_delays()
}

fn eight_results() -> Vec<SearchResult> {
    (1..=8)
        .map(|i| {
            SearchResult::new(
                format!("Result {i}"),
                format!("https://site{i}.example.com/product"),
                format!("Snippet about Acme Protein Bar number {i}"),
            )
        })
        .collect()
}

fn valid_report() -> &'static str {
    r#"Here is your analysis:
    {
        "product": {"name": "Protein Bar", "brand": "Acme", "category": "snack"},
        "nutrition_facts": {"serving_size": "60g", "calories": 220},
        "ingredients": [
            {"name": "soy protein isolate", "purpose": "protein source",
             "hormone_impact": "contains phytoestrogens", "risk_level": "moderate"}
        ],
        "hormone_impact": {"overall_score": 6, "concerns": ["phytoestrogens"], "endocrine_disruptors": []},
        "summary": "Moderate concern."
    }"#
}

#[tokio::test]
async fn test_full_success_path() {
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let search = MockSearchProvider::new().with_results(PRIMARY_QUERY, eight_results());

    // Top 5 of the top 6 get fetch attempts; two of them fail.
    let fetcher = MockContentFetcher::new()
        .with_page("https://site1.example.com/product", "Ingredients: oats, soy protein")
        .with_page("https://site3.example.com/product", "Nutrition facts: 220 kcal")
        .with_page("https://site5.example.com/product", "Allergens: soy, peanuts");

    let synthesis = MockSynthesisService::new().with_reply(valid_report());

    let pipeline = AnalysisPipeline::with_config(vision, search, fetcher, synthesis, config());
    let outcome = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    match &outcome {
        AnalysisOutcome::Complete {
            report,
            attributes,
            debug,
        } => {
            assert_eq!(report["product"]["brand"], "Acme");
            assert_eq!(attributes.brand.as_deref(), Some("Acme"));
            assert_eq!(debug.search_results_count, 8);
            assert_eq!(debug.scraped_pages_count, 3);
        }
        other => panic!("expected Complete, got {other:?}"),
    }
}

#[tokio::test]
async fn test_synthesis_prompt_contains_scraped_content() {
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let search = MockSearchProvider::new().with_results(PRIMARY_QUERY, eight_results());
    let fetcher = MockContentFetcher::new()
        .with_page("https://site2.example.com/product", "UNIQUE-CONTENT-MARKER oats");
    let synthesis = MockSynthesisService::new().with_reply(valid_report());

    // Mock clones share their call logs, so a handle kept here still
    // sees calls made through the pipeline's copy.
    let synthesis_handle = synthesis.clone();

    let pipeline = AnalysisPipeline::with_config(vision, search, fetcher, synthesis, config());
    let _ = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    let calls = synthesis_handle.calls();
    assert_eq!(calls.len(), 1);
    let (_system, user) = &calls[0];
    assert!(user.contains("UNIQUE-CONTENT-MARKER"));
    // Snippets of the top results also make it into the context.
    assert!(user.contains("Snippet about Acme Protein Bar number 1"));
    // The attributes block is embedded too.
    assert!(user.contains(r#""brand":"Acme""#));
}

#[tokio::test]
async fn test_fetch_attempts_follow_result_order() {
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let search = MockSearchProvider::new().with_results(PRIMARY_QUERY, eight_results());
    let fetcher = MockContentFetcher::new();
    let fetcher_handle = fetcher.clone();
    let synthesis = MockSynthesisService::new().with_reply(valid_report());

    let pipeline = AnalysisPipeline::with_config(vision, search, fetcher, synthesis, config());
    let _ = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    // Top 6 taken, top 5 of those attempted, in input order.
    assert_eq!(
        fetcher_handle.calls(),
        vec![
            "https://site1.example.com/product",
            "https://site2.example.com/product",
            "https://site3.example.com/product",
            "https://site4.example.com/product",
            "https://site5.example.com/product",
        ]
    );
}

#[tokio::test]
async fn test_vision_transport_error_is_hard_failure() {
    let vision = MockVisionService::new().with_failure();
    let pipeline = AnalysisPipeline::with_config(
        vision,
        MockSearchProvider::new(),
        MockContentFetcher::new(),
        MockSynthesisService::new().with_reply(valid_report()),
        config(),
    );

    let err = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Vision(_)));
}

#[tokio::test]
async fn test_garbage_vision_reply_degrades_to_empty_attributes() {
    let vision = MockVisionService::new().with_reply("I couldn't read the label, sorry!");
    // Empty attributes → query is the bare prefix.
    let search = MockSearchProvider::new();
    let synthesis = MockSynthesisService::new().with_reply(valid_report());

    let pipeline = AnalysisPipeline::with_config(
        vision,
        search,
        MockContentFetcher::new(),
        synthesis,
        config(),
    );

    let outcome = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    // The run survives to a complete report even with nothing to go on.
    assert!(outcome.is_complete());
    assert_eq!(outcome.debug().search_results_count, 0);
    assert_eq!(outcome.debug().scraped_pages_count, 0);
}

#[tokio::test]
async fn test_prose_synthesis_reply_yields_partial_envelope() {
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let search = MockSearchProvider::new().with_results(PRIMARY_QUERY, eight_results());
    let synthesis =
        MockSynthesisService::new().with_reply("I am unable to produce a report right now.");

    let pipeline = AnalysisPipeline::with_config(
        vision,
        search,
        MockContentFetcher::new(),
        synthesis,
        config(),
    );

    let outcome = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    match outcome {
        AnalysisOutcome::Partial {
            attributes,
            query,
            search_results,
            reason,
            debug,
        } => {
            assert_eq!(attributes.brand.as_deref(), Some("Acme"));
            assert_eq!(query, PRIMARY_QUERY);
            assert_eq!(search_results.len(), 8);
            assert!(reason.contains("no JSON object"));
            assert_eq!(debug.search_results_count, 8);
        }
        other => panic!("expected Partial, got {other:?}"),
    }
}

#[tokio::test]
async fn test_report_missing_required_field_yields_partial_envelope() {
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let search = MockSearchProvider::new().with_results(PRIMARY_QUERY, eight_results());
    // Shape-invalid: hormone_impact is missing.
    let synthesis = MockSynthesisService::new().with_reply(
        r#"{"product": {}, "nutrition_facts": {}, "ingredients": []}"#,
    );

    let pipeline = AnalysisPipeline::with_config(
        vision,
        search,
        MockContentFetcher::new(),
        synthesis,
        config(),
    );

    let outcome = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    match outcome {
        AnalysisOutcome::Partial { reason, .. } => {
            assert!(reason.contains("hormone_impact"));
        }
        other => panic!("expected Partial, got {other:?}"),
    }
}

#[tokio::test]
async fn test_synthesis_transport_error_is_hard_failure() {
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let synthesis = MockSynthesisService::new().with_failure();

    let pipeline = AnalysisPipeline::with_config(
        vision,
        MockSearchProvider::new(),
        MockContentFetcher::new(),
        synthesis,
        config(),
    );

    let err = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Synthesis(_)));
}

#[tokio::test]
async fn test_search_failure_everywhere_still_reaches_synthesis() {
    // Primary fails, fallback fails, no barcode: the synthesis call
    // still happens, with an explicit empty-context placeholder.
    let vision = MockVisionService::new()
        .with_reply(r#"{"brand":"Acme","product_name":"Protein Bar","visible_text":[]}"#);
    let search = MockSearchProvider::new()
        .with_failure(PRIMARY_QUERY)
        .with_failure("Protein Bar nutrition facts ingredients");
    let synthesis = MockSynthesisService::new().with_reply(valid_report());

    let pipeline = AnalysisPipeline::with_config(
        vision,
        search,
        MockContentFetcher::new(),
        synthesis,
        config(),
    );

    let outcome = pipeline
        .analyze_comprehensive("https://example.com/label.jpg")
        .await
        .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.debug().search_results_count, 0);
}
