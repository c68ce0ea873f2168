use std::cmp::Ordering;

use crate::models::{RankedTable, ReturnRow};

/// Descending order on (1-day, 5-day, 20-day) return
fn rank_order(a: &ReturnRow, b: &ReturnRow) -> Ordering {
    b.return_1
        .total_cmp(&a.return_1)
        .then_with(|| b.return_5.total_cmp(&a.return_5))
        .then_with(|| b.return_20.total_cmp(&a.return_20))
}

/// Sort rows best first. Rows that tie on all three figures keep their
/// input order.
pub fn rank(mut rows: Vec<ReturnRow>) -> RankedTable {
    rows.sort_by(rank_order);
    RankedTable::from_sorted(rows)
}
