pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSource;
pub use memory::MemorySource;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Trade;

/// Where journal entries come from. The engine never writes back.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn load_trades(&mut self) -> Result<Vec<Trade>>;
}
