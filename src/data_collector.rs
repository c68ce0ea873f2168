use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info};

use crate::api::PriceProvider;
use crate::models::{FetchOutcome, PriceData, PriceSeries, TickerList};

/// Downloads price history for a screening universe, one ticker at a time
pub struct DataCollector {
    provider: Arc<dyn PriceProvider>,
    history_start: NaiveDate,
}

impl DataCollector {
    pub fn new(provider: Arc<dyn PriceProvider>, history_start: NaiveDate) -> Self {
        Self {
            provider,
            history_start,
        }
    }

    /// Fetch every ticker from the history start through `to_date`.
    ///
    /// A failure only affects its own ticker: it is logged and recorded as
    /// [`FetchOutcome::Failed`], and the batch moves on.
    pub async fn collect(&self, tickers: &TickerList, to_date: NaiveDate) -> PriceData {
        let total = tickers.len();
        let mut data = PriceData::new();

        for (index, code) in tickers.codes().iter().enumerate() {
            let outcome = self.fetch_one(code, to_date).await;
            match &outcome {
                FetchOutcome::Fetched(series) => {
                    info!(
                        "✅ {}/{}: Now downloading data:{} - {} records",
                        index + 1,
                        total,
                        code,
                        series.len()
                    );
                }
                FetchOutcome::Failed { reason } => {
                    error!("❌ {}/{}: Error downloading data for {}: {}", index + 1, total, code, reason);
                }
            }
            data.insert(code.clone(), outcome);
        }

        info!(
            "📊 Download finished: {} fetched, {} failed",
            data.fetched_count(),
            data.failed_count()
        );
        data
    }

    async fn fetch_one(&self, code: &str, to_date: NaiveDate) -> FetchOutcome {
        match self
            .provider
            .get_price_history(code, self.history_start, to_date)
            .await
        {
            Ok(bars) if bars.is_empty() => FetchOutcome::Failed {
                reason: "no price data returned".to_string(),
            },
            Ok(bars) => FetchOutcome::Fetched(PriceSeries::new(code, bars)),
            Err(e) => FetchOutcome::Failed {
                reason: format!("{:#}", e),
            },
        }
    }
}
