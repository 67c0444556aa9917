//! Design request gateway.
//!
//! Validates and forwards AI design requests to the upstream image-generation
//! gateway. The boundary is stateless: it holds no per-request state, makes a
//! single forward call with no retries, and leaves persistence of the result
//! to the caller.
//!
//! Validation happens entirely before any network traffic, so malformed
//! requests never reach the upstream model.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use vizifit_core::Complexity;

use crate::config::GatewayConfig;

/// Maximum prompt length after trimming.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Garment types accepted by the gateway, lowercase.
pub const GARMENT_TYPES: &[&str] = &[
    "hoodie",
    "tshirt",
    "t-shirt",
    "shirt",
    "sweatshirt",
    "dress",
    "jacket",
    "pants",
];

/// Errors produced by the design gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client-correctable input problem, scoped to one field.
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// The offending request field.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// Upstream returned 429; the caller may retry after backing off.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Upstream returned 402: billing or credits exhausted.
    #[error("generation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream returned an unusable result (unexpected status, malformed
    /// body, or no image payload).
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// The forward request itself failed (connect, timeout, TLS).
    #[error("upstream request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A raw design request as received from the client, prior to validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDesignRequest {
    pub prompt: String,
    #[serde(alias = "clothingType")]
    pub clothing_type: String,
    pub complexity: String,
}

/// A validated design request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    /// Sanitized prompt: control characters stripped, whitespace collapsed.
    pub prompt: String,
    /// Case-normalized garment type from the allow-list.
    pub clothing_type: String,
    /// Recognized complexity tier.
    pub complexity: Complexity,
}

impl DesignRequest {
    /// Validate and sanitize a raw request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidInput`] naming the first offending
    /// field: empty or over-length prompt, garment type outside the
    /// allow-list, or unrecognized complexity.
    pub fn validate(raw: &RawDesignRequest) -> Result<Self, GatewayError> {
        let prompt = sanitize_prompt(&raw.prompt);
        if prompt.is_empty() {
            return Err(GatewayError::InvalidInput {
                field: "prompt",
                message: "prompt must not be empty".to_string(),
            });
        }
        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(GatewayError::InvalidInput {
                field: "prompt",
                message: format!("prompt must be at most {MAX_PROMPT_CHARS} characters"),
            });
        }

        let clothing_type = raw.clothing_type.trim().to_lowercase();
        if !GARMENT_TYPES.contains(&clothing_type.as_str()) {
            return Err(GatewayError::InvalidInput {
                field: "clothing_type",
                message: format!("unsupported garment type: {clothing_type}"),
            });
        }

        let complexity =
            raw.complexity
                .parse::<Complexity>()
                .map_err(|e| GatewayError::InvalidInput {
                    field: "complexity",
                    message: e,
                })?;

        Ok(Self {
            prompt,
            clothing_type,
            complexity,
        })
    }
}

/// A successful generation result.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDesign {
    /// Reference to the generated image.
    pub image_url: String,
    /// Accompanying model text, possibly empty.
    pub description: String,
}

/// Strip control characters and collapse whitespace runs.
#[must_use]
pub fn sanitize_prompt(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compose the full upstream prompt around a validated request.
///
/// The structural template is fixed; only the garment type, the sanitized
/// user request, and the complexity style clause vary.
#[must_use]
pub fn compose_prompt(request: &DesignRequest) -> String {
    format!(
        "Generate a high-quality, photorealistic fashion design image for an \
         e-commerce clothing brand called VIZIFIT.\n\n\
         The image must show ONLY the clothing item, clearly visible, centered, and well-lit.\n\n\
         Clothing type: {clothing_type}\n\
         User design request: {prompt}\n\
         Style: modern, premium, high-fashion, wearable\n\
         Fit: realistic proportions, tailored fit\n\
         Fabric: detailed fabric texture (cotton, denim, leather, silk, or techwear \
         fabric depending on item)\n\
         Color palette: elegant, neutral or trendy fashion colors\n\n\
         Background: clean studio background (white, light gray, or subtle gradient)\n\n\
         {style_clause}\n\n\
         Camera style: professional fashion catalog photo, sharp focus, high resolution\n\
         Lighting: soft studio lighting, natural shadows\n\
         Brand vibe: luxury fashion brand like Zara, SSENSE, Nike Lab\n\n\
         IMPORTANT:\n\
         - Do NOT add text, logos, or watermarks\n\
         - Do NOT generate random accessories unless requested\n\
         - The image must look suitable for a real online fashion store product page\n\
         - No distorted body parts\n\
         - No extra limbs\n\
         - No exaggerated poses\n\
         - No fantasy or sci-fi elements",
        clothing_type = request.clothing_type,
        prompt = request.prompt,
        style_clause = request.complexity.style_clause(),
    )
}

// =============================================================================
// Upstream wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct UpstreamRequest<'a> {
    model: &'a str,
    messages: Vec<UpstreamMessage<'a>>,
    modalities: [&'static str; 2],
}

#[derive(Debug, Serialize)]
struct UpstreamMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamResponse {
    #[serde(default)]
    choices: Vec<UpstreamChoice>,
}

#[derive(Debug, Deserialize)]
struct UpstreamChoice {
    message: UpstreamChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct UpstreamChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    images: Vec<UpstreamImage>,
}

#[derive(Debug, Deserialize)]
struct UpstreamImage {
    image_url: UpstreamImageUrl,
}

#[derive(Debug, Deserialize)]
struct UpstreamImageUrl {
    url: String,
}

// =============================================================================
// DesignGateway
// =============================================================================

/// Client for the upstream image-generation gateway.
///
/// Cheaply cloneable; safe to call concurrently.
#[derive(Clone)]
pub struct DesignGateway {
    inner: Arc<DesignGatewayInner>,
}

struct DesignGatewayInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl DesignGateway {
    /// Create a new gateway client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth = HeaderValue::from_str(&bearer).expect("Invalid API key for header");
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(DesignGatewayInner {
                client,
                endpoint: config.endpoint.clone(),
                model: config.model.clone(),
            }),
        }
    }

    /// Validate, sanitize, and forward a design request.
    ///
    /// Makes exactly one upstream call; the gateway never retries. Callers
    /// receiving [`GatewayError::RateLimited`] may retry after backoff.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`] for the full taxonomy.
    #[instrument(skip(self, raw), fields(model = %self.inner.model))]
    pub async fn generate(&self, raw: &RawDesignRequest) -> Result<GeneratedDesign, GatewayError> {
        let request = DesignRequest::validate(raw)?;
        let prompt = compose_prompt(&request);

        tracing::info!(
            clothing_type = %request.clothing_type,
            complexity = %request.complexity,
            prompt_chars = request.prompt.chars().count(),
            "forwarding design request"
        );

        let body = UpstreamRequest {
            model: &self.inner.model,
            messages: vec![UpstreamMessage {
                role: "user",
                content: &prompt,
            }],
            modalities: ["image", "text"],
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %detail, "upstream gateway error");
            return Err(translate_error_status(status, retry_after, &detail));
        }

        let parsed: UpstreamResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::GenerationFailed(format!("malformed response: {e}")))?;

        let design = extract_design(parsed)?;
        tracing::info!("design generated");
        Ok(design)
    }
}

/// Map a non-2xx upstream status to the gateway error taxonomy.
fn translate_error_status(
    status: StatusCode,
    retry_after: Option<u64>,
    detail: &str,
) -> GatewayError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(retry_after.unwrap_or(60)),
        StatusCode::PAYMENT_REQUIRED => {
            GatewayError::ServiceUnavailable("generation credits exhausted".to_string())
        }
        _ => GatewayError::GenerationFailed(format!(
            "upstream returned {status}: {}",
            detail.chars().take(200).collect::<String>()
        )),
    }
}

/// Pull the image reference and description out of a 2xx response.
///
/// A 2xx body without an image payload is a failed generation.
fn extract_design(response: UpstreamResponse) -> Result<GeneratedDesign, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::GenerationFailed("no choices in response".to_string()))?;

    let description = choice.message.content.unwrap_or_default();
    let image_url = choice
        .message
        .images
        .into_iter()
        .next()
        .map(|img| img.image_url.url)
        .ok_or_else(|| GatewayError::GenerationFailed("no image was generated".to_string()))?;

    Ok(GeneratedDesign {
        image_url,
        description,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(prompt: &str, clothing_type: &str, complexity: &str) -> RawDesignRequest {
        RawDesignRequest {
            prompt: prompt.to_string(),
            clothing_type: clothing_type.to_string(),
            complexity: complexity.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_normal_request() {
        let request =
            DesignRequest::validate(&raw("red hoodie with flames", "Hoodie", "simple")).unwrap();
        assert_eq!(request.clothing_type, "hoodie");
        assert_eq!(request.complexity, Complexity::Simple);
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let err = DesignRequest::validate(&raw("   ", "hoodie", "simple")).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InvalidInput { field: "prompt", .. }
        ));
    }

    #[test]
    fn test_validate_rejects_overlong_prompt() {
        let long = "x".repeat(501);
        let err = DesignRequest::validate(&raw(&long, "hoodie", "simple")).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InvalidInput { field: "prompt", .. }
        ));

        // Exactly 500 characters is fine
        let ok = "x".repeat(500);
        assert!(DesignRequest::validate(&raw(&ok, "hoodie", "simple")).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_garment() {
        let err = DesignRequest::validate(&raw("nice print", "banana", "simple")).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InvalidInput {
                field: "clothing_type",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_complexity() {
        let err = DesignRequest::validate(&raw("nice print", "hoodie", "extreme")).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InvalidInput {
                field: "complexity",
                ..
            }
        ));
    }

    #[test]
    fn test_sanitize_strips_controls_and_collapses_whitespace() {
        assert_eq!(
            sanitize_prompt("red\u{7} hoodie\n\n  with\tflames  "),
            "red hoodie with flames"
        );
        assert_eq!(sanitize_prompt("\u{0}\u{1}\u{2}"), "");
    }

    #[test]
    fn test_compose_prompt_embeds_request() {
        let request = DesignRequest::validate(&raw("wave pattern", "t-shirt", "complex")).unwrap();
        let prompt = compose_prompt(&request);
        assert!(prompt.contains("Clothing type: t-shirt"));
        assert!(prompt.contains("User design request: wave pattern"));
        assert!(prompt.contains(Complexity::Complex.style_clause()));
        assert!(prompt.contains("VIZIFIT"));
    }

    #[test]
    fn test_translate_429() {
        let err = translate_error_status(StatusCode::TOO_MANY_REQUESTS, Some(30), "");
        assert!(matches!(err, GatewayError::RateLimited(30)));

        let err = translate_error_status(StatusCode::TOO_MANY_REQUESTS, None, "");
        assert!(matches!(err, GatewayError::RateLimited(60)));
    }

    #[test]
    fn test_translate_402() {
        let err = translate_error_status(StatusCode::PAYMENT_REQUIRED, None, "credits");
        assert!(matches!(err, GatewayError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_translate_other_statuses() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            let err = translate_error_status(status, None, "boom");
            assert!(matches!(err, GatewayError::GenerationFailed(_)));
        }
    }

    #[test]
    fn test_extract_design_success() {
        let json = r#"{
            "choices": [{
                "message": {
                    "content": "A bold look.",
                    "images": [{"image_url": {"url": "https://img.test/d.png"}}]
                }
            }]
        }"#;
        let response: UpstreamResponse = serde_json::from_str(json).unwrap();
        let design = extract_design(response).unwrap();
        assert_eq!(design.image_url, "https://img.test/d.png");
        assert_eq!(design.description, "A bold look.");
    }

    #[test]
    fn test_extract_design_missing_image_fails() {
        let json = r#"{"choices": [{"message": {"content": "text only"}}]}"#;
        let response: UpstreamResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            extract_design(response).unwrap_err(),
            GatewayError::GenerationFailed(_)
        ));
    }

    #[test]
    fn test_extract_design_empty_description_ok() {
        let json = r#"{
            "choices": [{
                "message": {"images": [{"image_url": {"url": "https://img.test/d.png"}}]}
            }]
        }"#;
        let response: UpstreamResponse = serde_json::from_str(json).unwrap();
        let design = extract_design(response).unwrap();
        assert!(design.description.is_empty());
    }

    #[test]
    fn test_gateway_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<DesignGateway>();
        assert_send_sync::<DesignGateway>();
    }
}
