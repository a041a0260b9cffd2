pub mod basic;
pub mod drawdown;
pub mod playbook;
pub mod r_multiple;
pub mod report;
pub mod risk;
pub mod streaks;
pub mod tags;
pub mod wolf_score;

pub use basic::{calculate_metrics, TradeMetrics};
pub use drawdown::{track_drawdown, DrawdownReport, EquityPoint};
pub use playbook::{build_breakdown, BreakdownNode, GroupKey, KeyChain};
pub use r_multiple::calculate_r_multiple;
pub use report::JournalReport;
pub use risk::{calculate_risk_ratios, HoldTimeStats, RiskRatios};
pub use streaks::{analyze_streaks, StreakSummary};
pub use tags::{calculate_tag_metrics, calculate_timeframe_metrics, SegmentMetrics, TimeframeKind};
pub use wolf_score::{calculate_wolf_score, Grade, WolfScoreEngine, WolfScoreResult};
