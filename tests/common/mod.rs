#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use wolf_journal::models::{Direction, Outcome, Trade};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Closed trade with a stored outcome matching the sign of `pnl`.
pub fn closed(id: &str, day: &str, pnl: f64) -> Trade {
    let mut t = Trade::new(id, Direction::Long, 100.0, date(day));
    t.exit_price = Some(100.0 + pnl);
    t.exit_date = Some(date(day));
    t.pnl = Some(pnl);
    t.outcome = Outcome::from_pnl(pnl);
    t
}

/// Closed at a given clock time, for ordering tests.
pub fn closed_at(id: &str, day: &str, hh_mm: &str, pnl: f64) -> Trade {
    let mut t = closed(id, day, pnl);
    t.exit_time = Some(NaiveTime::parse_from_str(hh_mm, "%H:%M").unwrap());
    t
}

pub fn tagged(id: &str, day: &str, pnl: f64, tags: Option<&str>) -> Trade {
    let mut t = closed(id, day, pnl);
    t.tags = tags.map(str::to_string);
    t
}

/// Trade with every playbook label set; blank strings mean "not recorded".
pub fn labelled(id: &str, labels: [&str; 6], pnl: f64) -> Trade {
    let [htf, session, condition, tags, ltf, quality] = labels;
    let mut t = closed(id, "2024-11-12", pnl);
    t.tf_analise = Some(htf.to_string());
    t.session = Some(session.to_string());
    t.market_condition = Some(condition.to_string());
    t.tags = Some(tags.to_string());
    t.tf_entrada = Some(ltf.to_string());
    t.entry_quality = Some(quality.to_string());
    t.pd_array = Some(if pnl > 0.0 { "FVG" } else { "" }.to_string());
    t
}
