use super::*;
use crate::tests::Mono;
use labelhost_core::FontWeight;
use proptest::prelude::*;

fn arb_request() -> impl Strategy<Value = MeasureRequest> {
    (
        "[a-zA-Z]{1,12}( [a-zA-Z]{1,12}){0,8}(\n[a-zA-Z ]{0,20}){0,3}",
        1u32..64,
        0u32..64,
        1.0f32..400.0,
        prop_oneof![Just(0.0f32), 1.0f32..300.0],
        0.8f32..2.0,
    )
        .prop_map(|(text, max, min, width, height, line_height)| MeasureRequest {
            request_id: 0.into(),
            text,
            font_family: "Mono".into(),
            font_weight: FontWeight::REGULAR,
            max_font_size: max,
            min_font_size: min.min(max),
            max_width: width,
            max_height: height,
            line_height_multiplier: line_height,
            max_chars: None,
        })
}

// Property: fitted size stays within [min, max]
proptest! {
    #[test]
    fn prop_fitted_size_in_bounds(req in arb_request()) {
        let result = fit_text(&req, &Mono);
        prop_assert!(result.fitted_font_size >= req.min_font_size);
        prop_assert!(result.fitted_font_size <= req.max_font_size);
    }
}

// Property: wrapping again at the fitted size reproduces the lines
proptest! {
    #[test]
    fn prop_rewrap_at_fitted_size_is_stable(req in arb_request()) {
        let result = fit_text(&req, &Mono);
        let paragraphs = split_paragraphs(&req.text);
        let font = FontSpec::new("Mono", FontWeight::REGULAR, result.fitted_font_size as f32);
        let again = wrap_text(&paragraphs, &font, req.max_width, &Mono);
        prop_assert_eq!(again, result.lines);
    }
}

// Property: every word survives wrapping intact and in order
proptest! {
    #[test]
    fn prop_words_are_never_split_or_dropped(req in arb_request()) {
        let result = fit_text(&req, &Mono);
        let input: Vec<&str> = req.text.split_whitespace().collect();
        let output: Vec<&str> = result.lines.iter().flat_map(|l| l.split_whitespace()).collect();
        prop_assert_eq!(input, output);
    }
}

// Property: paragraphs map to disjoint line ranges
proptest! {
    #[test]
    fn prop_line_count_covers_every_paragraph(req in arb_request()) {
        let result = fit_text(&req, &Mono);
        prop_assert!(result.lines.len() >= split_paragraphs(&req.text).len());
    }
}
