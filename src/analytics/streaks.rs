use serde::{Deserialize, Serialize};

use crate::models::{Outcome, Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStreak {
    #[serde(rename = "type")]
    pub kind: StreakKind,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current_streak: CurrentStreak,
    pub max_win_streak: usize,
    pub max_loss_streak: usize,
}

/// Run lengths of consecutive wins and losses in entry order. Breakeven and
/// pending trades end a run without starting one.
pub fn analyze_streaks(trades: &[Trade]) -> StreakSummary {
    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by(|a, b| a.entry_at().cmp(&b.entry_at()).then_with(|| a.id.cmp(&b.id)));

    let mut kind = StreakKind::None;
    let mut count = 0usize;
    let mut max_win = 0usize;
    let mut max_loss = 0usize;

    for t in ordered {
        let next = match t.effective_outcome() {
            Outcome::Win => StreakKind::Win,
            Outcome::Loss => StreakKind::Loss,
            Outcome::Breakeven | Outcome::Pending => StreakKind::None,
        };

        if next == StreakKind::None {
            kind = StreakKind::None;
            count = 0;
            continue;
        }
        if next == kind {
            count += 1;
        } else {
            kind = next;
            count = 1;
        }
        match kind {
            StreakKind::Win => max_win = max_win.max(count),
            StreakKind::Loss => max_loss = max_loss.max(count),
            StreakKind::None => {}
        }
    }

    StreakSummary {
        current_streak: CurrentStreak { kind, count },
        max_win_streak: max_win,
        max_loss_streak: max_loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{closed_trade, open_trade};

    fn run(pnls: &[f64]) -> StreakSummary {
        let trades: Vec<Trade> = pnls
            .iter()
            .enumerate()
            .map(|(i, &p)| closed_trade(&format!("{:03}", i), &format!("2024-10-{:02}", i + 1), p))
            .collect();
        analyze_streaks(&trades)
    }

    #[test]
    fn tracks_runs() {
        let s = run(&[10.0, 20.0, 5.0, -1.0, -2.0, 3.0, -4.0, -5.0, -6.0, 7.0]);
        assert_eq!(s.max_win_streak, 3);
        assert_eq!(s.max_loss_streak, 3);
        assert_eq!(s.current_streak, CurrentStreak { kind: StreakKind::Win, count: 1 });
    }

    #[test]
    fn breakeven_breaks_a_run() {
        let s = run(&[-1.0, -1.0, 0.0, -1.0]);
        assert_eq!(s.max_loss_streak, 2);
        assert_eq!(s.current_streak, CurrentStreak { kind: StreakKind::Loss, count: 1 });
    }

    #[test]
    fn pending_last_leaves_no_current_streak() {
        let mut trades = vec![closed_trade("1", "2024-10-01", 5.0)];
        trades.push(open_trade("2", "2024-10-02"));
        let s = analyze_streaks(&trades);
        assert_eq!(s.current_streak, CurrentStreak { kind: StreakKind::None, count: 0 });
        assert_eq!(s.max_win_streak, 1);
    }

    #[test]
    fn sorts_by_entry_before_walking() {
        let trades = vec![
            closed_trade("3", "2024-10-03", 1.0),
            closed_trade("1", "2024-10-01", 1.0),
            closed_trade("2", "2024-10-02", -1.0),
        ];
        let s = analyze_streaks(&trades);
        assert_eq!(s.max_win_streak, 1);
        assert_eq!(s.max_loss_streak, 1);
    }

    #[test]
    fn empty_is_neutral() {
        let s = analyze_streaks(&[]);
        assert_eq!(s.current_streak.kind, StreakKind::None);
        assert_eq!(s.max_win_streak + s.max_loss_streak, 0);
    }
}
