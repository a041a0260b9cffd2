use chrono::{NaiveDate, NaiveTime};

use crate::models::{Direction, Outcome, Trade};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// Long trade entered at 100 and closed the same day for `pnl`.
pub fn closed_trade(id: &str, day: &str, pnl: f64) -> Trade {
    let mut t = Trade::new(id, Direction::Long, 100.0, date(day));
    t.exit_price = Some(100.0 + pnl);
    t.exit_date = Some(date(day));
    t.pnl = Some(pnl);
    t.outcome = Outcome::from_pnl(pnl);
    t
}

/// Still-running trade: no exit, no pnl.
pub fn open_trade(id: &str, day: &str) -> Trade {
    Trade::new(id, Direction::Long, 100.0, date(day))
}

/// Closed trade with entry and exit clock times on the same day.
pub fn timed_trade(id: &str, day: &str, entry: &str, exit: &str, pnl: f64) -> Trade {
    let mut t = closed_trade(id, day, pnl);
    t.entry_time = Some(time(entry));
    t.exit_time = Some(time(exit));
    t
}

pub fn with_tags(mut trade: Trade, tags: Option<&str>) -> Trade {
    trade.tags = tags.map(str::to_string);
    trade
}

/// Closed trade labelled for playbook grouping. Empty strings stand for
/// labels the trader left blank.
#[allow(clippy::too_many_arguments)]
pub fn classified_trade(
    id: &str,
    analysis_tf: &str,
    session: &str,
    condition: &str,
    tags: &str,
    entry_tf: &str,
    quality: &str,
    pnl: f64,
) -> Trade {
    let label = |s: &str| Some(s.to_string());
    let mut t = closed_trade(id, "2024-11-05", pnl);
    t.tf_analise = label(analysis_tf);
    t.session = label(session);
    t.market_condition = label(condition);
    t.tags = label(tags);
    t.tf_entrada = label(entry_tf);
    t.entry_quality = label(quality);
    t
}
