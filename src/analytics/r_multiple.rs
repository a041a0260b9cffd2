use crate::core::stats::round2;
use crate::models::{Direction, Trade};

/// Profit in units of the initial risk (entry-to-stop distance), to two decimals.
///
/// Returns None when a price is missing or the stop sits on the wrong side of
/// entry; neither case is an error.
pub fn calculate_r_multiple(
    direction: Direction,
    entry_price: f64,
    exit_price: Option<f64>,
    stop_loss: Option<f64>,
) -> Option<f64> {
    let exit = exit_price.filter(|p| p.is_finite())?;
    let stop = stop_loss.filter(|p| p.is_finite() && *p != 0.0)?;
    if !entry_price.is_finite() || entry_price == 0.0 {
        return None;
    }

    let (risk, profit) = match direction {
        Direction::Long => (entry_price - stop, exit - entry_price),
        Direction::Short => (stop - entry_price, entry_price - exit),
    };
    if risk <= 0.0 {
        return None;
    }
    Some(round2(profit / risk))
}

impl Trade {
    pub fn r_multiple(&self) -> Option<f64> {
        calculate_r_multiple(self.direction, self.entry_price, self.exit_price, self.stop())
    }
}

/// Mean R of the trades that define one, or None if none do.
pub fn average_r<'a, I>(trades: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let (sum, n) = trades
        .into_iter()
        .filter_map(|t| t.r_multiple())
        .fold((0.0, 0usize), |(s, n), r| (s + r, n + 1));
    (n > 0).then(|| round2(sum / n as f64))
}
