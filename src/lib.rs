pub mod analytics;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod source;
#[cfg(test)]
pub mod test_helpers;

pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};
pub use models::{Direction, Outcome, Trade};
