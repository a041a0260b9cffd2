use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::analytics::basic::calculate_metrics;
use crate::analytics::drawdown::track_drawdown;
use crate::config::ScoringConfig;
use crate::core::stats::{
    clamp_score, daily_pnl, ratio_or_sentinel, round1, round2, std_dev,
    RECOVERY_FACTOR_UNDEFINED_SENTINEL,
};
use crate::error::{ensure_balance, Result};
use crate::models::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Grade {
        if score >= 90.0 {
            Grade::S
        } else if score >= 80.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else if score >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Grade::S => "#FFD700",
            Grade::A => "#22C55E",
            Grade::B => "#3B82F6",
            Grade::C => "#EAB308",
            Grade::D => "#F97316",
            Grade::F => "#EF4444",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::S => "Alpha Wolf: elite performance with disciplined risk",
            Grade::A => "Pack Leader: strong, consistent edge",
            Grade::B => "Hunter: solid results with room to sharpen",
            Grade::C => "Scout: edge is forming but inconsistent",
            Grade::D => "Pup: results are fragile, tighten risk and process",
            Grade::F => "Lone Wolf: no reliable edge yet, review the playbook",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

/// The six sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfScoreMetrics {
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win_loss_ratio: f64,
    pub recovery_factor: f64,
    pub max_drawdown_score: f64,
    pub consistency: f64,
}

impl WolfScoreMetrics {
    fn rounded(&self) -> Self {
        Self {
            win_rate: round2(self.win_rate),
            profit_factor: round2(self.profit_factor),
            avg_win_loss_ratio: round2(self.avg_win_loss_ratio),
            recovery_factor: round2(self.recovery_factor),
            max_drawdown_score: round2(self.max_drawdown_score),
            consistency: round2(self.consistency),
        }
    }
}

/// Raw values the sub-scores were derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfScoreInputs {
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win_loss_ratio: f64,
    pub recovery_factor: f64,
    pub max_drawdown: f64,
    pub total_pnl: f64,
    pub daily_pnl_std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WolfScoreResult {
    pub score: f64,
    pub metrics: WolfScoreMetrics,
    pub grade: Grade,
    pub color: String,
    pub description: String,
    pub inputs: WolfScoreInputs,
}

pub fn win_rate_score(win_rate: f64, target: f64) -> f64 {
    clamp_score(win_rate / target * 100.0)
}

pub fn max_drawdown_score(max_drawdown: f64, initial_balance: f64) -> f64 {
    clamp_score(100.0 - max_drawdown * 100.0 / initial_balance)
}

/// Penalizes day-to-day swings relative to the total profit. No profit, no score.
pub fn consistency_score(daily_std_dev: f64, total_profit: f64) -> f64 {
    if total_profit <= 0.0 {
        return 0.0;
    }
    clamp_score(100.0 - daily_std_dev / total_profit * 100.0)
}

pub fn recovery_factor(total_pnl: f64, max_drawdown: f64) -> f64 {
    if max_drawdown <= 0.0 && total_pnl > 0.0 {
        debug!("No drawdown, recovery factor reported as {}", RECOVERY_FACTOR_UNDEFINED_SENTINEL);
    }
    ratio_or_sentinel(total_pnl, max_drawdown, RECOVERY_FACTOR_UNDEFINED_SENTINEL)
}

/// Folds six normalized components into one 0-100 score with a letter grade.
pub struct WolfScoreEngine {
    config: ScoringConfig,
}

impl Default for WolfScoreEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl WolfScoreEngine {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn calculate(&self, trades: &[Trade], initial_balance: f64) -> Result<WolfScoreResult> {
        let initial_balance = ensure_balance(initial_balance)?;
        let curves = &self.config.curves;

        let basic = calculate_metrics(trades);
        let drawdown = track_drawdown(trades, initial_balance);
        let total_pnl = drawdown.final_balance - initial_balance;
        let days: Vec<f64> = daily_pnl(trades).into_values().collect();
        let daily_sd = std_dev(&days);
        let recovery = recovery_factor(total_pnl, drawdown.max_drawdown);

        let inputs = WolfScoreInputs {
            win_rate: basic.win_rate,
            profit_factor: basic.profit_factor,
            avg_win_loss_ratio: basic.avg_win_loss_ratio,
            recovery_factor: recovery,
            max_drawdown: drawdown.max_drawdown,
            total_pnl,
            daily_pnl_std_dev: daily_sd,
        };

        let metrics = WolfScoreMetrics {
            win_rate: win_rate_score(basic.win_rate, curves.win_rate_target),
            profit_factor: curves.profit_factor.score(basic.profit_factor),
            avg_win_loss_ratio: curves.avg_win_loss.score(basic.avg_win_loss_ratio),
            recovery_factor: curves.recovery_factor.score(recovery),
            max_drawdown_score: max_drawdown_score(drawdown.max_drawdown, initial_balance),
            consistency: consistency_score(daily_sd, total_pnl),
        };

        let score = self.composite(&metrics);
        let grade = Grade::from_score(score);
        debug!(
            "Wolf score {:.1} ({}) over {} trade(s)",
            score,
            grade,
            trades.len()
        );

        Ok(WolfScoreResult {
            score,
            metrics: metrics.rounded(),
            grade,
            color: grade.color().to_string(),
            description: grade.description().to_string(),
            inputs,
        })
    }

    /// Weighted sum of the sub-scores, clamped and rounded to one decimal.
    pub fn composite(&self, m: &WolfScoreMetrics) -> f64 {
        let w = &self.config.weights;
        let raw = m.win_rate * w.win_rate
            + m.profit_factor * w.profit_factor
            + m.avg_win_loss_ratio * w.avg_win_loss_ratio
            + m.recovery_factor * w.recovery_factor
            + m.max_drawdown_score * w.max_drawdown
            + m.consistency * w.consistency;
        round1(clamp_score(raw))
    }
}

/// Wolf Score with the stock weights and curves.
pub fn calculate_wolf_score(trades: &[Trade], initial_balance: f64) -> Result<WolfScoreResult> {
    WolfScoreEngine::default().calculate(trades, initial_balance)
}
