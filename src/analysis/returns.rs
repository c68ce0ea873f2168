use tracing::warn;

use crate::models::{DataStatus, PriceData, PriceSeries, ReturnRow, TickerList, LOOKBACK_WINDOWS};
use crate::utils::round_one_decimal;

/// Percentage change from `w` bars back to the last close, rounded to one decimal.
///
/// `None` when the series is shorter than `w + 1` bars or the result is not a
/// finite number (zero or NaN reference close).
pub fn window_return(closes: &[f64], w: usize) -> Option<f64> {
    let last = closes.len().checked_sub(1)?;
    let base_idx = last.checked_sub(w)?;
    let (latest, base) = (closes[last], closes[base_idx]);

    let pct = 100.0 * (latest - base) / base;
    pct.is_finite().then(|| round_one_decimal(pct))
}

/// Return figures of one ticker, zero-filling windows that cannot be computed
pub fn compute_row(code: &str, name: &str, series: Option<&PriceSeries>) -> ReturnRow {
    let Some(series) = series else {
        warn!("⚠️ No price data for {}, using 0 returns", code);
        return ReturnRow::unavailable(code, name);
    };

    let closes: Vec<f64> = series.closes().collect();
    let figures = LOOKBACK_WINDOWS.map(|w| window_return(&closes, w));
    let computed = figures.iter().filter(|f| f.is_some()).count();

    let status = match computed {
        n if n == LOOKBACK_WINDOWS.len() => DataStatus::Complete,
        0 => DataStatus::Unavailable,
        _ => DataStatus::Partial,
    };
    if status != DataStatus::Complete {
        warn!(
            "⚠️ Error calculating returns for {}: only {} records, {} of {} windows set to 0",
            code,
            closes.len(),
            LOOKBACK_WINDOWS.len() - computed,
            LOOKBACK_WINDOWS.len()
        );
    }

    let [return_1, return_5, return_20] = figures.map(|f| f.unwrap_or(0.0));
    ReturnRow {
        code: code.to_string(),
        name: name.to_string(),
        return_1,
        return_5,
        return_20,
        status,
    }
}

/// One row per ticker in source order, whether or not it was fetched
pub fn compute_returns(tickers: &TickerList, data: &PriceData) -> Vec<ReturnRow> {
    tickers
        .iter()
        .map(|(code, name)| compute_row(code, name, data.series(code)))
        .collect()
}
