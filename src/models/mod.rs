use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod config;
pub use config::Config;

/// Benchmark instrument appended to every screened list
pub const BENCHMARK_CODE: &str = "^HSI";
pub const BENCHMARK_NAME: &str = "恆生指數";

/// Lookback windows, in trading days, for the return figures
pub const LOOKBACK_WINDOWS: [usize; 3] = [1, 5, 20];

/// Ordered list of instrument codes with their display names.
///
/// Codes and names are kept as two parallel sequences; every constructor keeps
/// them the same length so index `i` always refers to the same instrument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerList {
    codes: Vec<String>,
    names: Vec<String>,
}

impl TickerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.codes.push(code.into());
        self.names.push(name.into());
    }

    /// Append the benchmark pair as the final entry
    pub fn with_benchmark(mut self) -> Self {
        self.push(BENCHMARK_CODE, BENCHMARK_NAME);
        self
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(code, name)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes
            .iter()
            .map(String::as_str)
            .zip(self.names.iter().map(String::as_str))
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for TickerList {
    fn from_iter<I: IntoIterator<Item = (C, N)>>(iter: I) -> Self {
        let mut list = TickerList::new();
        for (code, name) in iter {
            list.push(code, name);
        }
        list
    }
}

/// One daily OHLCV record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
}

/// Daily bars of one symbol, ascending by date
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting the bars by date
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }

    /// Bars dated on or after `start`
    pub fn since(&self, start: NaiveDate) -> &[PriceBar] {
        let first = self.bars.partition_point(|bar| bar.date < start);
        &self.bars[first..]
    }
}

/// Result of downloading one ticker
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(PriceSeries),
    Failed { reason: String },
}

/// Fetch outcomes keyed by ticker code
#[derive(Debug, Clone, Default)]
pub struct PriceData {
    outcomes: HashMap<String, FetchOutcome>,
}

impl PriceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, outcome: FetchOutcome) {
        self.outcomes.insert(code.into(), outcome);
    }

    pub fn outcome(&self, code: &str) -> Option<&FetchOutcome> {
        self.outcomes.get(code)
    }

    /// The downloaded series, or `None` when the ticker failed or was never fetched
    pub fn series(&self, code: &str) -> Option<&PriceSeries> {
        match self.outcomes.get(code) {
            Some(FetchOutcome::Fetched(series)) => Some(series),
            _ => None,
        }
    }

    pub fn fetched_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, FetchOutcome::Fetched(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.fetched_count()
    }
}

/// Whether a row's figures came from data or from zero placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStatus {
    /// All three windows computed
    Complete,
    /// Some windows fell back to `0`
    Partial,
    /// No usable series; every figure is `0`
    Unavailable,
}

/// Return figures of one instrument, in percent with one decimal
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnRow {
    pub code: String,
    pub name: String,
    pub return_1: f64,
    pub return_5: f64,
    pub return_20: f64,
    pub status: DataStatus,
}

impl ReturnRow {
    /// Row with zero placeholders for every window
    pub fn unavailable(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            return_1: 0.0,
            return_5: 0.0,
            return_20: 0.0,
            status: DataStatus::Unavailable,
        }
    }

    pub fn sort_key(&self) -> (f64, f64, f64) {
        (self.return_1, self.return_5, self.return_20)
    }
}

/// Screening result, ranked best first
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    rows: Vec<ReturnRow>,
}

impl RankedTable {
    /// Wrap rows that are already in rank order
    pub(crate) fn from_sorted(rows: Vec<ReturnRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReturnRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Codes of the first `n` ranked rows
    pub fn top_codes(&self, n: usize) -> Vec<&str> {
        self.rows.iter().take(n).map(|r| r.code.as_str()).collect()
    }
}
