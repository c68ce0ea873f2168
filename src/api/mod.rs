use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

use crate::models::PriceBar;

pub mod telegram_client;
pub mod yahoo_client;
pub use telegram_client::TelegramClient;
pub use yahoo_client::YahooClient;

/// Source of daily price history
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    async fn get_price_history(
        &self,
        symbol: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<PriceBar>>;
}

/// Channel that receives the finished report files
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReportNotifier: Send + Sync {
    async fn send_document(&self, path: &Path) -> Result<()>;
    async fn send_photo(&self, path: &Path) -> Result<()>;
}
