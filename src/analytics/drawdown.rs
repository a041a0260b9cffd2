use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Trade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    pub trade_id: String,
    pub timestamp: NaiveDateTime,
    pub balance: f64,
    pub drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownReport {
    pub max_drawdown: f64,
    /// Max drawdown as a percent of the initial balance.
    pub max_drawdown_pct: f64,
    pub peak_balance: f64,
    pub final_balance: f64,
    pub equity_curve: Vec<EquityPoint>,
}

/// Closed trades with a realized pnl, ordered by exit (falling back to entry)
/// timestamp, ties broken by id so the walk is reproducible.
pub fn closed_in_exit_order(trades: &[Trade]) -> Vec<&Trade> {
    let mut closed: Vec<&Trade> = trades.iter().filter(|t| t.closed_pnl().is_some()).collect();
    closed.sort_by(|a, b| a.exit_at().cmp(&b.exit_at()).then_with(|| a.id.cmp(&b.id)));
    closed
}

/// Walks the equity curve from `initial_balance` and records the deepest
/// peak-to-trough decline. Input order does not matter.
pub fn track_drawdown(trades: &[Trade], initial_balance: f64) -> DrawdownReport {
    let mut balance = initial_balance;
    let mut peak = initial_balance;
    let mut max_drawdown: f64 = 0.0;
    let mut curve = Vec::new();

    for t in closed_in_exit_order(trades) {
        let Some(pnl) = t.closed_pnl() else {
            continue;
        };
        balance += pnl;
        peak = peak.max(balance);
        let drawdown = peak - balance;
        max_drawdown = max_drawdown.max(drawdown);
        curve.push(EquityPoint {
            trade_id: t.id.clone(),
            timestamp: t.exit_at(),
            balance,
            drawdown,
        });
    }

    let max_drawdown_pct = if initial_balance > 0.0 {
        max_drawdown * 100.0 / initial_balance
    } else {
        0.0
    };

    DrawdownReport {
        max_drawdown,
        max_drawdown_pct,
        peak_balance: peak,
        final_balance: balance,
        equity_curve: curve,
    }
}
