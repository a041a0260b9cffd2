use async_trait::async_trait;

use crate::error::Result;
use crate::models::Trade;
use crate::source::TradeSource;

/// Serves a fixed set of trades, e.g. records already fetched by the host app.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    trades: Vec<Trade>,
}

impl MemorySource {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[async_trait]
impl TradeSource for MemorySource {
    async fn load_trades(&mut self) -> Result<Vec<Trade>> {
        Ok(self.trades.clone())
    }
}
