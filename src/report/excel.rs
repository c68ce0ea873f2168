use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::models::RankedTable;

pub const HEADERS: [&str; 5] = [
    "Stock Code",
    "Stock Name",
    "Return(1day)",
    "Return(5days)",
    "Return(20days)",
];

/// Write the ranked table as a single-sheet workbook, header row first
pub fn write_ranked_table(table: &RankedTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_string(r, 0, &row.code)?;
        worksheet.write_string(r, 1, &row.name)?;
        worksheet.write_number(r, 2, row.return_1)?;
        worksheet.write_number(r, 3, row.return_5)?;
        worksheet.write_number(r, 4, row.return_20)?;
    }

    workbook.save(path)?;
    Ok(())
}
