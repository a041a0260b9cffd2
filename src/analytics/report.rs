use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::analytics::basic::{calculate_metrics, TradeMetrics};
use crate::analytics::drawdown::{track_drawdown, DrawdownReport};
use crate::analytics::playbook::{build_breakdown, BreakdownNode};
use crate::analytics::risk::{calculate_risk_ratios, RiskRatios};
use crate::analytics::streaks::{analyze_streaks, StreakKind, StreakSummary};
use crate::analytics::tags::{
    calculate_tag_metrics, calculate_timeframe_metrics, get_all_unique_tags, SegmentMetrics,
    TimeframeKind,
};
use crate::analytics::wolf_score::{WolfScoreEngine, WolfScoreResult};
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::models::Trade;

/// Everything the dashboard shows for one account, built in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalReport {
    // Period
    pub first_entry: Option<NaiveDate>,
    pub last_entry: Option<NaiveDate>,
    pub initial_balance: f64,

    pub metrics: TradeMetrics,
    pub drawdown: DrawdownReport,
    pub streaks: StreakSummary,
    pub risk: RiskRatios,
    pub wolf_score: WolfScoreResult,

    // Playbook review
    pub playbook: Vec<BreakdownNode>,
    pub unique_tags: Vec<String>,
    pub tag_metrics: BTreeMap<String, SegmentMetrics>,
    pub analysis_timeframes: BTreeMap<String, SegmentMetrics>,
    pub entry_timeframes: BTreeMap<String, SegmentMetrics>,
}

impl JournalReport {
    pub fn build(trades: &[Trade], cfg: &AnalyticsConfig) -> Result<Self> {
        let engine = WolfScoreEngine::new(cfg.scoring.clone())?;
        let wolf_score = engine.calculate(trades, cfg.initial_balance)?;
        let risk = calculate_risk_ratios(trades, cfg.initial_balance)?;

        let report = JournalReport {
            first_entry: trades.iter().map(|t| t.entry_date).min(),
            last_entry: trades.iter().map(|t| t.entry_date).max(),
            initial_balance: cfg.initial_balance,
            metrics: calculate_metrics(trades),
            drawdown: track_drawdown(trades, cfg.initial_balance),
            streaks: analyze_streaks(trades),
            risk,
            wolf_score,
            playbook: build_breakdown(trades, &cfg.key_chain),
            unique_tags: get_all_unique_tags(trades),
            tag_metrics: calculate_tag_metrics(trades),
            analysis_timeframes: calculate_timeframe_metrics(trades, TimeframeKind::Analysis),
            entry_timeframes: calculate_timeframe_metrics(trades, TimeframeKind::Entry),
        };

        info!(
            "Journal report built: {} trades, wolf score {:.1} ({})",
            report.metrics.total_trades, report.wolf_score.score, report.wolf_score.grade
        );
        Ok(report)
    }

    /// Tags ordered by net pnl, best first.
    pub fn tags_by_pnl(&self) -> Vec<(&String, &SegmentMetrics)> {
        let mut tags: Vec<_> = self.tag_metrics.iter().collect();
        tags.sort_by(|a, b| b.1.stats.pnl.total_cmp(&a.1.stats.pnl).then_with(|| a.0.cmp(b.0)));
        tags
    }

    pub fn print_summary(&self) {
        let m = &self.metrics;
        let w = &self.wolf_score;

        println!("\n{}", "=".repeat(70));
        println!("  TRADING JOURNAL REPORT");
        println!("{}", "=".repeat(70));
        if let (Some(first), Some(last)) = (self.first_entry, self.last_entry) {
            println!("  Period:      {} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"));
        }
        println!();
        println!("  WOLF SCORE");
        println!("  ───────────────────────────────────");
        println!("  Score:       {:.1} [{}]", w.score, w.grade);
        println!("  {}", w.description);
        println!("  Win Rate:        {:>6.1}", w.metrics.win_rate);
        println!("  Profit Factor:   {:>6.1}", w.metrics.profit_factor);
        println!("  Avg Win/Loss:    {:>6.1}", w.metrics.avg_win_loss_ratio);
        println!("  Recovery:        {:>6.1}", w.metrics.recovery_factor);
        println!("  Max Drawdown:    {:>6.1}", w.metrics.max_drawdown_score);
        println!("  Consistency:     {:>6.1}", w.metrics.consistency);
        println!();
        println!("  TRADES");
        println!("  ───────────────────────────────────");
        println!("  Total:       {}", m.total_trades);
        println!(
            "  W/L/BE/Open: {} / {} / {} / {}",
            m.wins, m.losses, m.breakeven, m.pending
        );
        println!("  Win Rate:    {:.1}%", m.win_rate);
        println!("  PnL:         ${:+.2}", m.total_pnl);
        println!("  Avg Win:     ${:.2}", m.avg_win);
        println!("  Avg Loss:    ${:.2}", m.avg_loss);
        println!("  Best:        ${:+.2}", m.best_trade);
        println!("  Worst:       ${:+.2}", m.worst_trade);
        println!("  Profit Factor: {:.2}", m.profit_factor);
        println!();
        println!("  RISK");
        println!("  ───────────────────────────────────");
        println!(
            "  Max DD:      ${:.2} ({:.1}%)",
            self.drawdown.max_drawdown, self.drawdown.max_drawdown_pct
        );
        println!("  Return:      {:+.1}%", self.risk.total_return_pct);
        println!("  Sharpe:      {:.2}", self.risk.sharpe_ratio);
        println!("  Calmar:      {:.2}", self.risk.calmar_ratio);
        println!(
            "  Hold (min):  all {:.0} | winners {:.0} | losers {:.0}",
            self.risk.hold_time.all, self.risk.hold_time.winners, self.risk.hold_time.losers
        );
        let streak = match self.streaks.current_streak.kind {
            StreakKind::Win => format!("{} win(s)", self.streaks.current_streak.count),
            StreakKind::Loss => format!("{} loss(es)", self.streaks.current_streak.count),
            StreakKind::None => "none".to_string(),
        };
        println!(
            "  Streaks:     current {} | best {}W | worst {}L",
            streak, self.streaks.max_win_streak, self.streaks.max_loss_streak
        );

        if !self.tag_metrics.is_empty() {
            println!();
            println!("  BY TAG");
            println!("  ───────────────────────────────────");
            for (tag, s) in self.tags_by_pnl() {
                println!(
                    "  {:>12}: {} trades | WR {:.0}% | PnL ${:+.2} | PF {:.2}",
                    tag, s.stats.total_trades, s.stats.win_rate, s.stats.pnl, s.profit_factor
                );
            }
        }

        if !self.playbook.is_empty() {
            println!();
            println!("  PLAYBOOK");
            println!("  ───────────────────────────────────");
            for node in &self.playbook {
                print_node(node, 1);
            }
        }

        println!("{}", "=".repeat(70));
    }
}

fn print_node(node: &BreakdownNode, depth: usize) {
    let rr = node
        .stats
        .avg_rr
        .map_or_else(|| "-".to_string(), |r| format!("{:.2}R", r));
    println!(
        "  {}{}: {} trades | WR {:.0}% | PnL ${:+.2} | {}",
        "  ".repeat(depth - 1),
        node.key,
        node.stats.total_trades,
        node.stats.win_rate,
        node.stats.pnl,
        rr
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
