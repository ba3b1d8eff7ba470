use thiserror::Error;

/// Unified error type for the entire portfolio-risk-core library.
///
/// The numeric pipeline (returns, metrics, normalization, weight checks) never
/// fails; these variants cover configuration, table construction and fetching.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration / Input ───────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("No price provider configured")]
    NoProvider,

    #[error("No prices available for {symbol} between {from} and {to}")]
    PriceNotAvailable {
        symbol: String,
        from: String,
        to: String,
    },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
