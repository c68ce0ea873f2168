//! Report files and their delivery.
//!
//! Every step here is best-effort: a failure is logged and the remaining
//! steps still run.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::api::ReportNotifier;
use crate::models::{Config, PriceData, RankedTable};
use crate::utils::run_date_stamp;

pub mod chart;
pub mod excel;

/// Files produced by a run; `None` when that step failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportArtifacts {
    pub spreadsheet: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

/// Which uploads reached the messaging channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub document_sent: bool,
    pub photo_sent: bool,
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// Save the ranked table to the dated result workbook
pub fn write_results(config: &Config, table: &RankedTable, run_date: NaiveDate) -> Option<PathBuf> {
    let path = config.result_path(run_date);
    let written = ensure_parent(&path)
        .map_err(anyhow::Error::from)
        .and_then(|_| excel::write_ranked_table(table, &path));

    match written {
        Ok(()) => {
            info!("✅ Results saved to {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("❌ Error saving results to {}: {:#}", path.display(), e);
            None
        }
    }
}

/// Plot the top ranked tickers and the benchmark, normalized from the chart start date
pub fn generate_chart(
    config: &Config,
    data: &PriceData,
    table: &RankedTable,
    run_date: NaiveDate,
) -> Option<PathBuf> {
    let codes = chart::chart_codes(&table.top_codes(chart::CHART_TOP_N));
    let mut lines = Vec::with_capacity(codes.len());
    for code in &codes {
        match data
            .series(code)
            .and_then(|series| chart::normalized_line(series, config.chart_start_date))
        {
            Some(line) => lines.push(line),
            None => warn!(
                "⚠️ No chart data for {} since {}, leaving it off the chart",
                code, config.chart_start_date
            ),
        }
    }

    let path = config.chart_path();
    let title = format!("Stock Performance Chart - {}", run_date_stamp(run_date));
    let rendered = ensure_parent(&path)
        .map_err(anyhow::Error::from)
        .and_then(|_| chart::render_chart(&lines, &title, &path));

    match rendered {
        Ok(()) => {
            info!("✅ Chart generated successfully");
            Some(path)
        }
        Err(e) => {
            error!("❌ Error generating chart: {:#}", e);
            None
        }
    }
}

/// Upload the workbook as a document and the chart as a photo.
///
/// The two uploads are independent; a missing artifact is skipped.
pub async fn deliver(notifier: &dyn ReportNotifier, artifacts: &ReportArtifacts) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    match &artifacts.spreadsheet {
        Some(path) => match notifier.send_document(path).await {
            Ok(()) => report.document_sent = true,
            Err(e) => error!("❌ Error sending results to Telegram: {:#}", e),
        },
        None => warn!("⚠️ No results file to send"),
    }

    match &artifacts.chart {
        Some(path) => match notifier.send_photo(path).await {
            Ok(()) => report.photo_sent = true,
            Err(e) => error!("❌ Error sending chart to Telegram: {:#}", e),
        },
        None => warn!("⚠️ No chart to send"),
    }

    if report.document_sent && report.photo_sent {
        info!("✅ Results sent to Telegram successfully");
    }
    report
}
