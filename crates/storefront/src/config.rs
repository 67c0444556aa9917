//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VIZIFIT_AI_GATEWAY_KEY` - Bearer key for the upstream image-generation
//!   gateway (validated for placeholder patterns and entropy)
//! - `VIZIFIT_IDENTITY_URL` - Base URL of the hosted identity provider
//!
//! ## Optional
//! - `VIZIFIT_HOST` - Bind address (default: 127.0.0.1)
//! - `VIZIFIT_PORT` - Listen port (default: 3000)
//! - `VIZIFIT_AI_GATEWAY_URL` - Upstream chat-completions endpoint
//! - `VIZIFIT_AI_MODEL` - Upstream model identifier
//! - `VIZIFIT_DATA_DIR` - Directory for per-user history files (default: ./data)
//! - `VIZIFIT_PROCESSING_DELAY_MS` - Simulated checkout processing delay
//!   (default: 2500)
//! - `VIZIFIT_SESSION_TTL_SECS` - Idle session lifetime (default: 1800)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-3-pro-image-preview";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding per-user history files
    pub data_dir: PathBuf,
    /// Simulated payment-processing delay applied at checkout submission
    pub processing_delay: Duration,
    /// Idle lifetime of a shopper session
    pub session_ttl: Duration,
    /// Upstream AI image-generation gateway configuration
    pub gateway: GatewayConfig,
    /// Hosted identity provider configuration
    pub identity: IdentityConfig,
}

/// Upstream AI gateway configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Chat-completions endpoint of the upstream gateway
    pub endpoint: String,
    /// Model identifier requested from the gateway
    pub model: String,
    /// Bearer API key for the gateway
    pub api_key: SecretString,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Hosted identity provider configuration.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity provider (e.g. `https://id.example.com`)
    pub base_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the gateway key fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("VIZIFIT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VIZIFIT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VIZIFIT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VIZIFIT_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("VIZIFIT_DATA_DIR", "./data"));
        let processing_delay = Duration::from_millis(parse_env_or_default(
            "VIZIFIT_PROCESSING_DELAY_MS",
            2_500,
        )?);
        let session_ttl =
            Duration::from_secs(parse_env_or_default("VIZIFIT_SESSION_TTL_SECS", 1_800)?);

        let gateway = GatewayConfig::from_env()?;
        let identity = IdentityConfig::from_env()?;

        Ok(Self {
            host,
            port,
            data_dir,
            processing_delay,
            session_ttl,
            gateway,
            identity,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GatewayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: get_env_or_default("VIZIFIT_AI_GATEWAY_URL", DEFAULT_GATEWAY_URL),
            model: get_env_or_default("VIZIFIT_AI_MODEL", DEFAULT_MODEL),
            api_key: get_validated_secret("VIZIFIT_AI_GATEWAY_KEY")?,
        })
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_required_env("VIZIFIT_IDENTITY_URL")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a numeric environment variable with a default value.
fn parse_env_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match get_optional_env(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated key."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
