use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::stats::{ratio_or_sentinel, round2, PROFIT_FACTOR_UNDEFINED_SENTINEL};
use crate::models::{Outcome, Trade};

/// Headline numbers for a trade collection, recomputed on every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakeven: usize,
    pub pending: usize,
    /// Percent of decided trades (wins + losses) that won.
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_pnl: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub avg_win: f64,
    /// Magnitude, never negative.
    pub avg_loss: f64,
    pub avg_win_loss_ratio: f64,
    pub expectancy: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
}

pub fn calculate_metrics(trades: &[Trade]) -> TradeMetrics {
    let mut m = TradeMetrics {
        total_trades: trades.len(),
        ..Default::default()
    };

    let mut best = f64::NEG_INFINITY;
    let mut worst = f64::INFINITY;
    let mut closed_pnl = 0.0;
    let mut closed = 0usize;
    // wins/losses that carry a pnl; the others only count toward the rates
    let mut priced_wins = 0usize;
    let mut priced_losses = 0usize;

    for t in trades {
        let outcome = t.effective_outcome();
        match outcome {
            Outcome::Win => m.wins += 1,
            Outcome::Loss => m.losses += 1,
            Outcome::Breakeven => m.breakeven += 1,
            Outcome::Pending => m.pending += 1,
        }

        let Some(pnl) = t.realized_pnl() else {
            continue;
        };
        m.total_pnl += pnl;
        best = best.max(pnl);
        worst = worst.min(pnl);

        if outcome != Outcome::Pending {
            closed_pnl += pnl;
            closed += 1;
        }
        match outcome {
            Outcome::Win => {
                m.gross_profit += pnl;
                priced_wins += 1;
            }
            Outcome::Loss => {
                m.gross_loss += pnl.abs();
                priced_losses += 1;
            }
            _ => {}
        }
    }

    let decided = m.wins + m.losses;
    if decided > 0 {
        m.win_rate = m.wins as f64 / decided as f64 * 100.0;
    }
    if priced_wins > 0 {
        m.avg_win = m.gross_profit / priced_wins as f64;
    }
    if priced_losses > 0 {
        m.avg_loss = m.gross_loss / priced_losses as f64;
    }

    m.profit_factor = profit_factor(
        m.avg_win * priced_wins as f64,
        m.avg_loss * priced_losses as f64,
    );
    m.avg_win_loss_ratio =
        ratio_or_sentinel(m.avg_win, m.avg_loss, PROFIT_FACTOR_UNDEFINED_SENTINEL);
    if closed > 0 {
        m.expectancy = closed_pnl / closed as f64;
    }
    if best.is_finite() {
        m.best_trade = best;
        m.worst_trade = worst;
    }

    m
}

/// Gross profit over gross loss, with the sentinel when nothing was lost.
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss <= 0.0 && gross_profit > 0.0 {
        debug!("No losing trades, profit factor reported as {}", PROFIT_FACTOR_UNDEFINED_SENTINEL);
    }
    ratio_or_sentinel(gross_profit, gross_loss, PROFIT_FACTOR_UNDEFINED_SENTINEL)
}

impl TradeMetrics {
    /// Copy with ratios rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            win_rate: round2(self.win_rate),
            profit_factor: round2(self.profit_factor),
            avg_win: round2(self.avg_win),
            avg_loss: round2(self.avg_loss),
            avg_win_loss_ratio: round2(self.avg_win_loss_ratio),
            expectancy: round2(self.expectancy),
            ..self.clone()
        }
    }
}
