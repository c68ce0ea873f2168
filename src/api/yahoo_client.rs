use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::PriceProvider;
use crate::models::{Config, PriceBar};

/// Yahoo Finance chart response envelope
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Seconds east of UTC for the listing exchange
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Market-data client for the Yahoo Finance chart endpoint
pub struct YahooClient {
    client: Client,
    base_url: Url,
}

impl YahooClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config.yahoo_base_url.clone())
    }

    pub fn with_base_url(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; stock-screener/1.0)")
            .build()?;

        Ok(Self { client, base_url })
    }

    fn chart_url(&self, symbol: &str, from_date: NaiveDate, to_date: NaiveDate) -> Result<Url> {
        let encoded: String = url::form_urlencoded::byte_serialize(symbol.as_bytes()).collect();
        let mut url = self.base_url.join(&format!("v8/finance/chart/{}", encoded))?;

        // period2 is exclusive, so ask for the whole of `to_date`
        let period1 = from_date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        let period2 = (to_date + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp());
        let (period1, period2) = period1
            .zip(period2)
            .ok_or_else(|| anyhow!("invalid date range {} to {}", from_date, to_date))?;

        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl PriceProvider for YahooClient {
    async fn get_price_history(
        &self,
        symbol: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        let url = self.chart_url(symbol, from_date, to_date)?;
        debug!("Making request to: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request price history for {}", symbol))?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ChartEnvelope>(&body) {
                if let Some(error) = envelope.chart.error {
                    return Err(anyhow!(
                        "{} ({}): {}",
                        error.code,
                        status,
                        error.description
                    ));
                }
            }
            return Err(anyhow!("API request failed with status {}: {}", status, body));
        }

        let bars = parse_chart(symbol, &body)?;
        debug!(
            "Retrieved {} price bars for {} from {} to {}",
            bars.len(),
            symbol,
            from_date,
            to_date
        );
        Ok(bars)
    }
}

/// Convert a chart response body into daily bars, ascending by date.
///
/// Rows without a finite close are dropped; missing open/high/low fall back to
/// the close.
fn parse_chart(symbol: &str, body: &str) -> Result<Vec<PriceBar>> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).with_context(|| format!("parse chart response for {}", symbol))?;

    if let Some(error) = envelope.chart.error {
        return Err(anyhow!("{}: {}", error.code, error.description));
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| anyhow!("missing chart result for {}", symbol))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let close = match quote.close.get(i).copied().flatten() {
            Some(v) if v.is_finite() => v,
            _ => continue,
        };
        let date = match DateTime::from_timestamp(ts + offset, 0) {
            Some(dt) => dt.date_naive(),
            None => continue,
        };
        let column = |values: &[Option<f64>]| values.get(i).copied().flatten().unwrap_or(close);

        bars.push(PriceBar {
            date,
            open: column(&quote.open),
            high: column(&quote.high),
            low: column(&quote.low),
            close,
            volume: quote.volume.get(i).copied().flatten().map(|v| v as i64),
        });
    }

    if bars.is_empty() {
        return Err(anyhow!("no price data returned for {}", symbol));
    }

    bars.sort_by_key(|bar| bar.date);
    Ok(bars)
}
