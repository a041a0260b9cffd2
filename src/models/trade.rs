use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Direction, Outcome};

/// A journal entry as supplied by the persistence layer. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub direction: Direction,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    #[serde(default = "default_lot")]
    pub lot: f64,
    pub entry_date: NaiveDate,
    #[serde(default, deserialize_with = "loose_time")]
    pub entry_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "loose_date")]
    pub exit_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose_time")]
    pub exit_time: Option<NaiveTime>,
    #[serde(default = "default_outcome")]
    pub outcome: Outcome,
    #[serde(default)]
    pub pnl: Option<f64>,

    // Classification labels, used only as grouping keys
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub tf_analise: Option<String>,
    #[serde(default)]
    pub tf_entrada: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub market_condition: Option<String>,
    #[serde(default)]
    pub pd_array: Option<String>,
    #[serde(default)]
    pub entry_quality: Option<String>,
}

fn default_lot() -> f64 {
    1.0
}

fn default_outcome() -> Outcome {
    Outcome::Pending
}

impl Trade {
    /// Minimal closed-or-open record; classification fields start empty.
    pub fn new(id: impl Into<String>, direction: Direction, entry_price: f64, entry_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            direction,
            entry_price,
            exit_price: None,
            stop_loss: None,
            take_profit: None,
            lot: 1.0,
            entry_date,
            entry_time: None,
            exit_date: None,
            exit_time: None,
            outcome: Outcome::Pending,
            pnl: None,
            tags: None,
            strategy: None,
            setup: None,
            tf_analise: None,
            tf_entrada: None,
            session: None,
            market_condition: None,
            pd_array: None,
            entry_quality: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.exit_price.is_some()
    }

    /// Outcome with the record invariant applied: an open trade is pending no
    /// matter what was stored, and a realized pnl decides the rest.
    pub fn effective_outcome(&self) -> Outcome {
        if !self.is_closed() {
            return Outcome::Pending;
        }
        match self.pnl {
            Some(p) if p.is_finite() => Outcome::from_pnl(p),
            _ => self.outcome,
        }
    }

    /// Finite pnl, if recorded.
    pub fn realized_pnl(&self) -> Option<f64> {
        self.pnl.filter(|p| p.is_finite())
    }

    /// Pnl of a closed trade; open trades report None even if a floating pnl is stored.
    pub fn closed_pnl(&self) -> Option<f64> {
        if self.is_closed() {
            self.realized_pnl()
        } else {
            None
        }
    }

    /// Stop loss, treating zero as unset.
    pub fn stop(&self) -> Option<f64> {
        self.stop_loss.filter(|s| *s != 0.0 && s.is_finite())
    }

    pub fn entry_at(&self) -> NaiveDateTime {
        self.entry_date
            .and_time(self.entry_time.unwrap_or(NaiveTime::MIN))
    }

    /// Exit timestamp, falling back to the entry timestamp when no exit date is recorded.
    pub fn exit_at(&self) -> NaiveDateTime {
        match self.exit_date {
            Some(d) => d.and_time(self.exit_time.unwrap_or(NaiveTime::MIN)),
            None => self.entry_at(),
        }
    }

    /// Only defined when both ends carry a date and a time of day.
    pub fn hold_minutes(&self) -> Option<f64> {
        let entry = self.entry_date.and_time(self.entry_time?);
        let exit = self.exit_date?.and_time(self.exit_time?);
        let minutes = (exit - entry).num_seconds() as f64 / 60.0;
        (minutes >= 0.0).then_some(minutes)
    }

    /// Calendar day the result is booked on.
    pub fn close_day(&self) -> NaiveDate {
        self.exit_date.unwrap_or(self.entry_date)
    }
}

fn blank_to_none(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn loose_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match blank_to_none(raw) {
        None => Ok(None),
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M"))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn loose_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match blank_to_none(raw) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
