//! The screening run: tickers → prices → ranked returns → report → delivery.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{error, info};

use crate::analysis::build_ranked_table;
use crate::api::{PriceProvider, ReportNotifier, TelegramClient, YahooClient};
use crate::data_collector::DataCollector;
use crate::error::ScreeningError;
use crate::models::{Config, DataStatus, RankedTable};
use crate::report::{self, DeliveryReport, ReportArtifacts};
use crate::ticker_source::load_ticker_list;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct ScreeningSummary {
    pub run_date: NaiveDate,
    pub tickers: usize,
    pub fetched: usize,
    pub failed: usize,
    pub table: RankedTable,
    pub artifacts: ReportArtifacts,
    pub delivery: DeliveryReport,
}

/// Run the pipeline against the live market-data and Telegram APIs
pub async fn run_stock_screening(config: &Config) -> Result<ScreeningSummary> {
    // Check before building clients so nothing is fetched without a destination
    config.telegram_credentials()?;

    let provider: Arc<dyn PriceProvider> = Arc::new(YahooClient::new(config)?);
    let notifier = TelegramClient::new(config)?;

    Ok(run_pipeline(config, provider, &notifier, Local::now().date_naive()).await?)
}

/// Run the pipeline for `run_date` with the given collaborators.
///
/// Only missing credentials and an unreadable ticker file end the run early;
/// everything after the download is best-effort.
pub async fn run_pipeline(
    config: &Config,
    provider: Arc<dyn PriceProvider>,
    notifier: &dyn ReportNotifier,
    run_date: NaiveDate,
) -> Result<ScreeningSummary, ScreeningError> {
    info!("🚀 Starting stock screening process...");

    if let Err(e) = config.telegram_credentials() {
        error!("❌ {}", e);
        return Err(e);
    }

    let input_path = config.input_path();
    let tickers = load_ticker_list(&input_path).map_err(|e| {
        error!("❌ Error loading stock data from Excel: {}", e);
        e
    })?;

    let collector = DataCollector::new(provider, config.history_start_date);
    let data = collector.collect(&tickers, run_date).await;

    let table = build_ranked_table(&tickers, &data);
    let placeholders = table
        .rows()
        .iter()
        .filter(|row| row.status != DataStatus::Complete)
        .count();
    info!(
        "📊 Ranked {} stocks ({} with placeholder returns)",
        table.len(),
        placeholders
    );

    let artifacts = ReportArtifacts {
        spreadsheet: report::write_results(config, &table, run_date),
        chart: report::generate_chart(config, &data, &table, run_date),
    };
    let delivery = report::deliver(notifier, &artifacts).await;

    Ok(ScreeningSummary {
        run_date,
        tickers: tickers.len(),
        fetched: data.fetched_count(),
        failed: data.failed_count(),
        table,
        artifacts,
        delivery,
    })
}

/// Run once and log the outcome; returns whether the run completed
pub async fn run_and_log(config: &Config) -> bool {
    match run_stock_screening(config).await {
        Ok(summary) => {
            info!(
                "🎉 Stock screening process completed successfully: {} stocks, {} downloaded, {} failed",
                summary.tickers, summary.fetched, summary.failed
            );
            true
        }
        Err(e) => {
            error!("❌ Error in stock screening process: {:#}", e);
            false
        }
    }
}
