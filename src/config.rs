use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

use crate::analytics::playbook::KeyChain;
use crate::core::ScoringCurve;
use crate::error::{ensure_balance, AnalyticsError, Result};

/// Composite weights for the six Wolf Score components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win_loss_ratio: f64,
    pub recovery_factor: f64,
    pub max_drawdown: f64,
    pub consistency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            win_rate: 0.15,
            profit_factor: 0.25,
            avg_win_loss_ratio: 0.20,
            recovery_factor: 0.10,
            max_drawdown: 0.20,
            consistency: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("winRate", self.win_rate),
            ("profitFactor", self.profit_factor),
            ("avgWinLossRatio", self.avg_win_loss_ratio),
            ("recoveryFactor", self.recovery_factor),
            ("maxDrawdown", self.max_drawdown),
            ("consistency", self.consistency),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringCurves {
    /// Win rate (%) that earns a full win-rate score.
    pub win_rate_target: f64,
    pub profit_factor: ScoringCurve,
    pub avg_win_loss: ScoringCurve,
    pub recovery_factor: ScoringCurve,
}

impl Default for ScoringCurves {
    fn default() -> Self {
        Self {
            win_rate_target: 60.0,
            profit_factor: ScoringCurve::profit_factor(),
            avg_win_loss: ScoringCurve::avg_win_loss(),
            recovery_factor: ScoringCurve::recovery_factor(),
        }
    }
}

/// Injectable Wolf Score configuration; every field defaults to the stock table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub curves: ScoringCurves,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        for (metric, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalyticsError::InvalidWeight { metric, value });
            }
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            warn!("Score weights sum to {:.4}, composite will be clamped to [0, 100]", total);
        }

        let target = self.curves.win_rate_target;
        if !target.is_finite() || target <= 0.0 || target > 100.0 {
            return Err(AnalyticsError::InvalidCurve {
                curve: "winRate".to_string(),
                reason: format!("target {} must lie in (0, 100]", target),
            });
        }
        self.curves.profit_factor.validate("profitFactor")?;
        self.curves.avg_win_loss.validate("avgWinLoss")?;
        self.curves.recovery_factor.validate("recoveryFactor")?;
        Ok(())
    }

    pub fn from_json_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
            path: path.to_string(),
            source,
        })?;
        let cfg: ScoringConfig =
            serde_json::from_str(&content).map_err(|source| AnalyticsError::Parse {
                path: path.to_string(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    // Account
    pub initial_balance: f64,

    // Wolf Score
    pub scoring: ScoringConfig,

    // Playbook breakdown
    pub key_chain: KeyChain,

    // Logging
    pub log_level: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            initial_balance: 10_000.0,
            scoring: ScoringConfig::default(),
            key_chain: KeyChain::playbook_review(),
            log_level: "info".to_string(),
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let mut cfg = AnalyticsConfig::default();

        if let Some(raw) = env("INITIAL_BALANCE") {
            let balance: f64 = raw.trim().parse().map_err(|_| AnalyticsError::InvalidEnv {
                key: "INITIAL_BALANCE".to_string(),
                value: raw.clone(),
            })?;
            cfg.initial_balance = ensure_balance(balance)?;
        }

        if let Some(level) = env("LOG_LEVEL") {
            cfg.log_level = level;
        }

        if let Some(path) = env("SCORING_CONFIG") {
            cfg.scoring = ScoringConfig::from_json_file(&path)?;
        }

        if let Some(name) = env("KEY_CHAIN") {
            cfg.key_chain = KeyChain::preset(&name).ok_or(AnalyticsError::InvalidEnv {
                key: "KEY_CHAIN".to_string(),
                value: name,
            })?;
        }

        Ok(cfg)
    }
}
