//! Design request validation and prompt composition.
//!
//! Exercises the gateway's offline surface: everything up to (but not
//! including) the network call.

use vizifit_core::{Complexity, Price};
use vizifit_storefront::services::RawDesignRequest;
use vizifit_storefront::services::design::{
    DesignRequest, GARMENT_TYPES, GatewayError, MAX_PROMPT_CHARS, compose_prompt,
};

fn raw(prompt: &str, clothing_type: &str, complexity: &str) -> RawDesignRequest {
    RawDesignRequest {
        prompt: prompt.to_string(),
        clothing_type: clothing_type.to_string(),
        complexity: complexity.to_string(),
    }
}

#[test]
fn test_every_listed_garment_type_validates() {
    for garment in GARMENT_TYPES {
        let request = DesignRequest::validate(&raw("minimal logo", garment, "simple")).unwrap();
        assert_eq!(request.clothing_type, *garment);
    }
}

#[test]
fn test_garment_type_is_case_normalized() {
    let request = DesignRequest::validate(&raw("minimal logo", "  T-Shirt ", "simple")).unwrap();
    assert_eq!(request.clothing_type, "t-shirt");
}

#[test]
fn test_prompt_is_sanitized_before_length_check() {
    // Whitespace padding does not count against the limit
    let padded = format!("  {}  ", "y".repeat(MAX_PROMPT_CHARS));
    assert!(DesignRequest::validate(&raw(&padded, "hoodie", "simple")).is_ok());
}

#[test]
fn test_control_characters_never_reach_the_prompt() {
    let request =
        DesignRequest::validate(&raw("line\u{1b}[31mred\u{7}", "hoodie", "simple")).unwrap();
    assert!(!request.prompt.chars().any(char::is_control));
    let prompt = compose_prompt(&request);
    assert!(!prompt.contains('\u{1b}'));
}

#[test]
fn test_each_complexity_gets_its_own_style_clause() {
    let prompts: Vec<String> = ["simple", "detailed", "complex"]
        .iter()
        .map(|c| {
            let request = DesignRequest::validate(&raw("angular print", "jacket", c)).unwrap();
            compose_prompt(&request)
        })
        .collect();

    assert_ne!(prompts[0], prompts[1]);
    assert_ne!(prompts[1], prompts[2]);
    for prompt in &prompts {
        assert!(prompt.contains("Clothing type: jacket"));
        assert!(prompt.contains("User design request: angular print"));
    }
}

#[test]
fn test_fee_schedule_matches_complexity() {
    assert_eq!(Complexity::Simple.fee(), Price::from_units(10));
    assert_eq!(Complexity::Detailed.fee(), Price::from_units(20));
    assert_eq!(Complexity::Complex.fee(), Price::from_units(30));
}

#[test]
fn test_invalid_requests_name_the_field() {
    let cases = [
        (raw("", "hoodie", "simple"), "prompt"),
        (raw("ok", "sneakers", "simple"), "clothing_type"),
        (raw("ok", "hoodie", "ultra"), "complexity"),
    ];
    for (request, expected_field) in cases {
        match DesignRequest::validate(&request).unwrap_err() {
            GatewayError::InvalidInput { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
