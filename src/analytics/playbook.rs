use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::analytics::r_multiple::average_r;
use crate::analytics::tags::parse_tags_from_string;
use crate::core::sessions::session_for;
use crate::error::AnalyticsError;
use crate::models::{Outcome, Trade};

/// Bucket for trades with no value on a grouping key.
pub const UNDEFINED_KEY: &str = "undefined";

/// Separator between tags in a confluence signature.
pub const TAG_SIGNATURE_SEPARATOR: &str = " + ";

/// Dimension label of a caller-defined grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyName(pub &'static str);

/// A grouping dimension. `Custom` carries a caller-supplied extractor and
/// cannot be named in configuration files.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    AnalysisTimeframe,
    EntryTimeframe,
    Session,
    DerivedSession,
    MarketCondition,
    PdArray,
    EntryQuality,
    Strategy,
    Setup,
    Direction,
    TagSignature,
    #[serde(skip)]
    Custom {
        name: KeyName,
        extract: fn(&Trade) -> Option<String>,
    },
}

impl GroupKey {
    pub fn name(&self) -> &'static str {
        match self {
            GroupKey::AnalysisTimeframe => "analysis_timeframe",
            GroupKey::EntryTimeframe => "entry_timeframe",
            GroupKey::Session => "session",
            GroupKey::DerivedSession => "derived_session",
            GroupKey::MarketCondition => "market_condition",
            GroupKey::PdArray => "pd_array",
            GroupKey::EntryQuality => "entry_quality",
            GroupKey::Strategy => "strategy",
            GroupKey::Setup => "setup",
            GroupKey::Direction => "direction",
            GroupKey::TagSignature => "tag_signature",
            GroupKey::Custom { name, .. } => name.0,
        }
    }

    /// The trade's value on this key, or None when it has none.
    pub fn extract(&self, trade: &Trade) -> Option<String> {
        match self {
            GroupKey::AnalysisTimeframe => label(&trade.tf_analise),
            GroupKey::EntryTimeframe => label(&trade.tf_entrada),
            GroupKey::Session => label(&trade.session),
            GroupKey::DerivedSession => trade
                .entry_time
                .map(|time| session_for(trade.entry_date.and_time(time)).to_string()),
            GroupKey::MarketCondition => label(&trade.market_condition),
            GroupKey::PdArray => label(&trade.pd_array),
            GroupKey::EntryQuality => label(&trade.entry_quality),
            GroupKey::Strategy => label(&trade.strategy),
            GroupKey::Setup => label(&trade.setup),
            GroupKey::Direction => Some(trade.direction.as_str().to_string()),
            GroupKey::TagSignature => tag_signature(trade.tags.as_deref()),
            GroupKey::Custom { extract, .. } => extract(trade)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Like `extract`, with missing values mapped to the undefined bucket.
    pub fn bucket(&self, trade: &Trade) -> String {
        self.extract(trade)
            .unwrap_or_else(|| UNDEFINED_KEY.to_string())
    }
}

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Custom { name, .. } => write!(f, "Custom({})", name.0),
            other => f.write_str(other.name()),
        }
    }
}

fn label(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Sorted, de-duplicated confluence tags joined into one key.
pub fn tag_signature(tags: Option<&str>) -> Option<String> {
    let mut parsed = parse_tags_from_string(tags);
    if parsed.is_empty() {
        return None;
    }
    parsed.sort();
    parsed.dedup();
    Some(parsed.join(TAG_SIGNATURE_SEPARATOR))
}

/// Ordered, non-empty list of grouping keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<GroupKey>", into = "Vec<GroupKey>")]
pub struct KeyChain(Vec<GroupKey>);

impl KeyChain {
    pub fn new(keys: Vec<GroupKey>) -> Result<Self, AnalyticsError> {
        if keys.is_empty() {
            return Err(AnalyticsError::EmptyKeyChain);
        }
        Ok(Self(keys))
    }

    /// HTF, session, condition, confluence tags, LTF, entry quality.
    pub fn playbook_review() -> Self {
        Self(vec![
            GroupKey::AnalysisTimeframe,
            GroupKey::Session,
            GroupKey::MarketCondition,
            GroupKey::TagSignature,
            GroupKey::EntryTimeframe,
            GroupKey::EntryQuality,
        ])
    }

    /// HTF, condition, PD array, session, LTF.
    pub fn market_context() -> Self {
        Self(vec![
            GroupKey::AnalysisTimeframe,
            GroupKey::MarketCondition,
            GroupKey::PdArray,
            GroupKey::Session,
            GroupKey::EntryTimeframe,
        ])
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim() {
            "playbook_review" => Some(Self::playbook_review()),
            "market_context" => Some(Self::market_context()),
            _ => None,
        }
    }

    pub fn keys(&self) -> &[GroupKey] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<GroupKey>> for KeyChain {
    type Error = AnalyticsError;

    fn try_from(keys: Vec<GroupKey>) -> Result<Self, Self::Error> {
        KeyChain::new(keys)
    }
}

impl From<KeyChain> for Vec<GroupKey> {
    fn from(chain: KeyChain) -> Self {
        chain.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub wins: usize,
    pub losses: usize,
    pub pnl: f64,
    /// Percent of wins among wins + losses.
    pub win_rate: f64,
    #[serde(rename = "avgRR")]
    pub avg_rr: Option<f64>,
    pub total_trades: usize,
}

pub fn compute_base_stats(trades: &[&Trade]) -> BaseStats {
    let mut stats = BaseStats {
        total_trades: trades.len(),
        ..Default::default()
    };
    for t in trades {
        match t.effective_outcome() {
            Outcome::Win => stats.wins += 1,
            Outcome::Loss => stats.losses += 1,
            _ => {}
        }
        if let Some(p) = t.realized_pnl() {
            stats.pnl += p;
        }
    }
    let decided = stats.wins + stats.losses;
    if decided > 0 {
        stats.win_rate = stats.wins as f64 / decided as f64 * 100.0;
    }
    stats.avg_rr = average_r(trades.iter().copied());
    stats
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownNode {
    pub dimension: String,
    pub key: String,
    #[serde(flatten)]
    pub stats: BaseStats,
    pub children: Vec<BreakdownNode>,
}

impl BreakdownNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn leaves(&self) -> Vec<&BreakdownNode> {
        if self.is_leaf() {
            return vec![self];
        }
        self.children.iter().flat_map(|c| c.leaves()).collect()
    }

    pub fn child(&self, key: &str) -> Option<&BreakdownNode> {
        self.children.iter().find(|c| c.key == key)
    }
}

/// Builds a fresh breakdown tree. Siblings are ordered by descending trade
/// count, ties by key; empty groups never appear.
pub fn build_breakdown(trades: &[Trade], chain: &KeyChain) -> Vec<BreakdownNode> {
    let all: Vec<&Trade> = trades.iter().collect();
    build_level(&all, chain.keys())
}

fn build_level(trades: &[&Trade], keys: &[GroupKey]) -> Vec<BreakdownNode> {
    let Some((key, rest)) = keys.split_first() else {
        return Vec::new();
    };

    let mut groups: BTreeMap<String, Vec<&Trade>> = BTreeMap::new();
    for &t in trades {
        groups.entry(key.bucket(t)).or_default().push(t);
    }

    let mut nodes: Vec<BreakdownNode> = groups
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(value, members)| BreakdownNode {
            dimension: key.name().to_string(),
            key: value,
            stats: compute_base_stats(&members),
            children: build_level(&members, rest),
        })
        .collect();

    nodes.sort_by(|a, b| {
        b.stats
            .total_trades
            .cmp(&a.stats.total_trades)
            .then_with(|| a.key.cmp(&b.key))
    });
    nodes
}
