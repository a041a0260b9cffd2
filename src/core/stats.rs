use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::Trade;

/// Stand-in for an undefined profit factor (gross profit with no losses).
/// A display convention for the dashboard, not a derived quantity.
pub const PROFIT_FACTOR_UNDEFINED_SENTINEL: f64 = 999.0;

/// Stand-in for an undefined recovery or Calmar ratio (profit with zero drawdown).
pub const RECOVERY_FACTOR_UNDEFINED_SENTINEL: f64 = 999.0;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation; 0.0 for fewer than two samples.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let avg = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// `numerator / denominator`, with `sentinel` standing in when the denominator
/// vanishes but there is something positive to divide. Never NaN or infinite.
pub fn ratio_or_sentinel(numerator: f64, denominator: f64, sentinel: f64) -> f64 {
    if denominator > 0.0 {
        let r = numerator / denominator;
        if r.is_finite() {
            r.max(0.0)
        } else {
            sentinel
        }
    } else if numerator > 0.0 {
        sentinel
    } else {
        0.0
    }
}

/// Realized pnl per calendar day for closed trades, keyed by close day.
pub fn daily_pnl(trades: &[Trade]) -> BTreeMap<NaiveDate, f64> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for t in trades {
        if let Some(p) = t.closed_pnl() {
            *days.entry(t.close_day()).or_default() += p;
        }
    }
    days
}

pub fn clamp_score(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 100.0)
}

pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
