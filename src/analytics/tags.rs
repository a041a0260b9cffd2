use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::analytics::basic::profit_factor;
use crate::analytics::playbook::{compute_base_stats, BaseStats, GroupKey};
use crate::models::{Outcome, Trade};

/// Comma-separated confluence labels, trimmed, empties dropped.
pub fn parse_tags_from_string(tags: Option<&str>) -> Vec<String> {
    tags.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Every tag used across the journal, sorted ascending.
pub fn get_all_unique_tags(trades: &[Trade]) -> Vec<String> {
    trades
        .iter()
        .flat_map(|t| parse_tags_from_string(t.tags.as_deref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One flat level of the breakdown, plus profit factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMetrics {
    #[serde(flatten)]
    pub stats: BaseStats,
    pub profit_factor: f64,
}

impl SegmentMetrics {
    pub fn net_pnl(&self) -> f64 {
        self.stats.pnl
    }
}

fn segment(trades: &[&Trade]) -> SegmentMetrics {
    let (gross_profit, gross_loss) = trades
        .iter()
        .filter_map(|t| t.realized_pnl().map(|p| (t.effective_outcome(), p)))
        .fold((0.0, 0.0), |(gp, gl), (outcome, p)| match outcome {
            Outcome::Win => (gp + p, gl),
            Outcome::Loss => (gp, gl + p.abs()),
            _ => (gp, gl),
        });

    SegmentMetrics {
        stats: compute_base_stats(trades),
        profit_factor: profit_factor(gross_profit, gross_loss),
    }
}

/// Metrics per tag. A trade carrying several tags counts toward each of them.
pub fn calculate_tag_metrics(trades: &[Trade]) -> BTreeMap<String, SegmentMetrics> {
    let mut by_tag: BTreeMap<String, Vec<&Trade>> = BTreeMap::new();
    for t in trades {
        let mut tags = parse_tags_from_string(t.tags.as_deref());
        tags.sort();
        tags.dedup();
        for tag in tags {
            by_tag.entry(tag).or_default().push(t);
        }
    }
    by_tag
        .into_iter()
        .map(|(tag, members)| (tag, segment(&members)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeframeKind {
    Analysis,
    Entry,
}

impl TimeframeKind {
    fn key(self) -> GroupKey {
        match self {
            TimeframeKind::Analysis => GroupKey::AnalysisTimeframe,
            TimeframeKind::Entry => GroupKey::EntryTimeframe,
        }
    }
}

/// Metrics per timeframe label; trades without one go to the undefined bucket.
pub fn calculate_timeframe_metrics(
    trades: &[Trade],
    kind: TimeframeKind,
) -> BTreeMap<String, SegmentMetrics> {
    let key = kind.key();
    let mut by_tf: BTreeMap<String, Vec<&Trade>> = BTreeMap::new();
    for t in trades {
        by_tf.entry(key.bucket(t)).or_default().push(t);
    }
    by_tf
        .into_iter()
        .map(|(tf, members)| (tf, segment(&members)))
        .collect()
}
