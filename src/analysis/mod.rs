//! Short-horizon return metrics and the ranked screening table.

pub mod ranking;
pub mod returns;

pub use ranking::rank;
pub use returns::{compute_returns, compute_row, window_return};

use crate::models::{PriceData, RankedTable, TickerList};

/// Compute every ticker's returns and rank them
pub fn build_ranked_table(tickers: &TickerList, data: &PriceData) -> RankedTable {
    rank(compute_returns(tickers, data))
}
