use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::drawdown::track_drawdown;
use crate::core::stats::{daily_pnl, mean, std_dev, RECOVERY_FACTOR_UNDEFINED_SENTINEL};
use crate::error::{ensure_balance, Result};
use crate::models::{Outcome, Trade};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldTimeStats {
    /// Mean minutes in the trade; 0 when no sample.
    pub winners: f64,
    pub losers: f64,
    pub all: f64,
    pub winner_samples: usize,
    pub loser_samples: usize,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRatios {
    pub sharpe_ratio: f64,
    pub calmar_ratio: f64,
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub hold_time: HoldTimeStats,
}

/// Mean daily pnl over its population standard deviation. Zero when the
/// days show no variance.
pub fn sharpe_ratio(trades: &[Trade]) -> f64 {
    let days: Vec<f64> = daily_pnl(trades).into_values().collect();
    let Some(avg) = mean(&days) else {
        return 0.0;
    };
    let sd = std_dev(&days);
    // spread at rounding-noise level counts as flat
    let scale = days.iter().map(|d| d.abs()).sum::<f64>() / days.len() as f64;
    if sd <= f64::EPSILON * scale.max(1.0) {
        debug!("Daily pnl has no variance over {} day(s), sharpe set to 0", days.len());
        return 0.0;
    }
    avg / sd
}

/// Return over drawdown, both as percentages of the initial balance.
pub fn calmar_ratio(total_pnl: f64, max_drawdown: f64, initial_balance: f64) -> f64 {
    let return_pct = total_pnl * 100.0 / initial_balance;
    let drawdown_pct = max_drawdown * 100.0 / initial_balance;
    if drawdown_pct > 0.0 {
        return_pct / drawdown_pct
    } else if return_pct > 0.0 {
        RECOVERY_FACTOR_UNDEFINED_SENTINEL
    } else {
        0.0
    }
}

pub fn hold_times(trades: &[Trade]) -> HoldTimeStats {
    let mut winners = Vec::new();
    let mut losers = Vec::new();
    let mut all = Vec::new();

    for t in trades.iter().filter(|t| t.is_closed()) {
        let Some(minutes) = t.hold_minutes() else {
            continue;
        };
        match t.effective_outcome() {
            Outcome::Win => winners.push(minutes),
            Outcome::Loss => losers.push(minutes),
            _ => {}
        }
        all.push(minutes);
    }

    HoldTimeStats {
        winners: mean(&winners).unwrap_or(0.0),
        losers: mean(&losers).unwrap_or(0.0),
        all: mean(&all).unwrap_or(0.0),
        winner_samples: winners.len(),
        loser_samples: losers.len(),
        samples: all.len(),
    }
}

pub fn calculate_risk_ratios(trades: &[Trade], initial_balance: f64) -> Result<RiskRatios> {
    let initial_balance = ensure_balance(initial_balance)?;
    let drawdown = track_drawdown(trades, initial_balance);
    let total_pnl = drawdown.final_balance - initial_balance;

    Ok(RiskRatios {
        sharpe_ratio: sharpe_ratio(trades),
        calmar_ratio: calmar_ratio(total_pnl, drawdown.max_drawdown, initial_balance),
        total_return_pct: total_pnl * 100.0 / initial_balance,
        max_drawdown_pct: drawdown.max_drawdown_pct,
        hold_time: hold_times(trades),
    })
}
