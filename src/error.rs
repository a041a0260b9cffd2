use thiserror::Error;

/// Contract violations by the caller. Data-quality problems in trade records
/// never surface here; calculators resolve them with documented fallbacks.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("initial balance must be a positive finite number, got {0}")]
    InvalidInitialBalance(f64),

    #[error("scoring curve '{curve}' is invalid: {reason}")]
    InvalidCurve { curve: String, reason: String },

    #[error("score weight '{metric}' must be finite and non-negative, got {value}")]
    InvalidWeight { metric: &'static str, value: f64 },

    #[error("key chain is empty; a breakdown needs at least one grouping key")]
    EmptyKeyChain,

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Rejects balances that would make percentage metrics meaningless.
pub fn ensure_balance(initial_balance: f64) -> Result<f64> {
    if initial_balance.is_finite() && initial_balance > 0.0 {
        Ok(initial_balance)
    } else {
        Err(AnalyticsError::InvalidInitialBalance(initial_balance))
    }
}
