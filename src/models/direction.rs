use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "Long", alias = "LONG")]
    Long,
    #[serde(alias = "Short", alias = "SHORT")]
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[serde(alias = "Win", alias = "WIN")]
    Win,
    #[serde(alias = "Loss", alias = "LOSS")]
    Loss,
    #[serde(alias = "Breakeven", alias = "BREAKEVEN", alias = "be")]
    Breakeven,
    #[serde(alias = "Pending", alias = "PENDING", alias = "open")]
    Pending,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Breakeven => "breakeven",
            Outcome::Pending => "pending",
        }
    }

    /// Outcome implied by a realized P&L.
    pub fn from_pnl(pnl: f64) -> Outcome {
        if pnl > 0.0 {
            Outcome::Win
        } else if pnl < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Breakeven
        }
    }

    /// Wins and losses are the only outcomes that count toward rate denominators.
    pub fn is_decided(&self) -> bool {
        matches!(self, Outcome::Win | Outcome::Loss)
    }
}
