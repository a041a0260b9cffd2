mod common;

use async_trait::async_trait;

use common::{closed, closed_at, labelled, tagged};
use wolf_journal::analytics::basic::calculate_metrics;
use wolf_journal::analytics::drawdown::track_drawdown;
use wolf_journal::analytics::playbook::{build_breakdown, BreakdownNode, KeyChain};
use wolf_journal::analytics::r_multiple::calculate_r_multiple;
use wolf_journal::analytics::tags::{calculate_tag_metrics, get_all_unique_tags};
use wolf_journal::analytics::wolf_score::{calculate_wolf_score, Grade};
use wolf_journal::analytics::JournalReport;
use wolf_journal::config::AnalyticsConfig;
use wolf_journal::core::stats::PROFIT_FACTOR_UNDEFINED_SENTINEL;
use wolf_journal::error::{AnalyticsError, Result};
use wolf_journal::models::{Direction, Outcome, Trade};
use wolf_journal::source::{MemorySource, TradeSource};

/// A source that fails the way a storage layer would.
struct BrokenSource;

#[async_trait]
impl TradeSource for BrokenSource {
    async fn load_trades(&mut self) -> Result<Vec<Trade>> {
        Err(AnalyticsError::Io {
            path: "journal".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        })
    }
}

async fn report_from(source: &mut dyn TradeSource) -> Result<JournalReport> {
    let trades = source.load_trades().await?;
    JournalReport::build(&trades, &AnalyticsConfig::default())
}

#[tokio::test]
async fn full_pipeline_from_source() {
    let mut source = MemorySource::new(vec![
        tagged("1", "2024-11-01", 100.0, Some("FVG")),
        tagged("2", "2024-11-04", -50.0, Some("OB, FVG")),
        tagged("3", "2024-11-05", 200.0, None),
    ]);

    let report = report_from(&mut source).await.unwrap();
    assert_eq!(report.metrics.total_trades, 3);
    assert_eq!(report.metrics.total_pnl, 250.0);
    assert_eq!(report.drawdown.final_balance, 10_250.0);
    assert_eq!(report.drawdown.max_drawdown, 50.0);
    assert_eq!(report.streaks.current_streak.count, 1);
    assert!(report.wolf_score.score > 0.0 && report.wolf_score.score <= 100.0);
    assert_eq!(report.wolf_score.grade, Grade::from_score(report.wolf_score.score));
    assert_eq!(report.unique_tags, vec!["FVG", "OB"]);
    assert_eq!(report.tag_metrics["FVG"].stats.total_trades, 2);
}

#[tokio::test]
async fn source_failure_surfaces_as_error() {
    let result = report_from(&mut BrokenSource).await;
    assert!(matches!(result, Err(AnalyticsError::Io { .. })));
}

#[test]
fn three_trade_scenario() {
    let trades = vec![
        closed("1", "2024-11-01", 100.0),
        closed("2", "2024-11-02", -50.0),
        closed("3", "2024-11-03", 200.0),
    ];
    let m = calculate_metrics(&trades).rounded();
    assert_eq!(m.total_trades, 3);
    assert_eq!(m.win_rate, 66.67);
    assert_eq!(m.total_pnl, 250.0);
    assert_eq!(m.profit_factor, 6.0);
    assert_eq!(m.best_trade, 200.0);
    assert_eq!(m.worst_trade, -50.0);
}

#[test]
fn tag_scenario() {
    let trades = vec![
        tagged("1", "2024-11-01", 100.0, Some("tag1, tag2")),
        tagged("2", "2024-11-02", -40.0, Some("tag2, tag3")),
        tagged("3", "2024-11-03", 200.0, Some(" tag1 ,  tag3 ")),
        tagged("4", "2024-11-04", 25.0, None),
    ];
    assert_eq!(get_all_unique_tags(&trades), vec!["tag1", "tag2", "tag3"]);

    let metrics = calculate_tag_metrics(&trades);
    assert_eq!(metrics.len(), 3);
    assert_eq!(metrics["tag1"].net_pnl(), 300.0);
    assert_eq!(metrics["tag1"].profit_factor, PROFIT_FACTOR_UNDEFINED_SENTINEL);
}

#[test]
fn breakeven_scenario() {
    let mut be = closed("2", "2024-11-02", 0.0);
    be.outcome = Outcome::Breakeven;
    let trades = vec![closed("1", "2024-11-01", 30.0), be, closed("3", "2024-11-03", -10.0)];
    let m = calculate_metrics(&trades);
    assert_eq!(m.total_trades, 3);
    assert_eq!(m.win_rate, 50.0);
    assert_eq!(m.total_pnl, 20.0);
}

#[test]
fn drawdown_ignores_input_order() {
    let sorted = vec![
        closed_at("a", "2024-11-01", "10:00", 200.0),
        closed_at("b", "2024-11-01", "15:00", -300.0),
        closed_at("c", "2024-11-02", "09:00", -100.0),
        closed_at("d", "2024-11-03", "09:00", 500.0),
        closed_at("e", "2024-11-04", "09:00", -250.0),
    ];
    let expected = track_drawdown(&sorted, 5_000.0);
    assert_eq!(expected.max_drawdown, 400.0);
    assert_eq!(track_drawdown(&sorted, 5_000.0), expected);

    let mut shuffled = sorted.clone();
    shuffled.swap(0, 4);
    shuffled.swap(1, 3);
    shuffled.rotate_left(2);
    assert_eq!(track_drawdown(&shuffled, 5_000.0), expected);
}

fn count_empty_nodes(nodes: &[BreakdownNode]) -> usize {
    nodes
        .iter()
        .map(|n| usize::from(n.stats.total_trades == 0) + count_empty_nodes(&n.children))
        .sum()
}

#[test]
fn playbook_leaves_account_for_every_trade() {
    let trades = vec![
        labelled("1", ["H4", "London", "trending", "FVG, OB", "M5", "A"], 120.0),
        labelled("2", ["H4", "London", "trending", "OB", "M5", "A"], -60.0),
        labelled("3", ["H1", "New York", "ranging", "", "M1", "B"], 45.0),
        labelled("4", ["", "", "", "", "", ""], -15.0),
        labelled("5", ["D1", "Asia", "trending", "SMT", "", "C"], 0.0),
    ];

    for chain in [KeyChain::playbook_review(), KeyChain::market_context()] {
        let tree = build_breakdown(&trades, &chain);
        let leaves: Vec<&BreakdownNode> = tree.iter().flat_map(|n| n.leaves()).collect();
        let total: usize = leaves.iter().map(|l| l.stats.total_trades).sum();
        assert_eq!(total, trades.len());
        assert_eq!(count_empty_nodes(&tree), 0);
        let root_sum: usize = tree.iter().map(|n| n.stats.total_trades).sum();
        assert_eq!(root_sum, trades.len());
    }
}

#[test]
fn r_multiple_sign_follows_direction() {
    // long from 100 to 110 risking 5
    let long = calculate_r_multiple(Direction::Long, 100.0, Some(110.0), Some(95.0));
    assert_eq!(long, Some(2.0));

    // same prices as a short, with the stop mirrored above entry
    let short = calculate_r_multiple(Direction::Short, 100.0, Some(110.0), Some(105.0));
    assert_eq!(short, Some(-2.0));

    // no stop, no R
    assert_eq!(calculate_r_multiple(Direction::Long, 100.0, Some(110.0), None), None);
}

#[test]
fn empty_journal_is_well_defined() {
    let result = calculate_wolf_score(&[], 10_000.0).unwrap();
    assert!((0.0..=100.0).contains(&result.score));
    assert_eq!(result.grade, Grade::F);

    let report = JournalReport::build(&[], &AnalyticsConfig::default()).unwrap();
    assert!(report.playbook.is_empty());
    assert_eq!(report.metrics.profit_factor, 0.0);
}

#[test]
fn invalid_balance_is_rejected() {
    let cfg = AnalyticsConfig {
        initial_balance: -1.0,
        ..AnalyticsConfig::default()
    };
    assert!(matches!(
        JournalReport::build(&[], &cfg),
        Err(AnalyticsError::InvalidInitialBalance(_))
    ));
}
