//! Loads the screening universe from an exported ticker spreadsheet.
//!
//! The export has one header row; the code column is `代號` and the name
//! column is `名稱`. Codes carry a one-character prefix that is not part of the
//! market-data symbol, so it is dropped. The benchmark is appended last.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{info, warn};

use crate::error::ScreeningError;
use crate::models::TickerList;

pub const CODE_COLUMN: &str = "代號";
pub const NAME_COLUMN: &str = "名稱";

/// Read the ticker file at `path` and append the benchmark
pub fn load_ticker_list(path: &Path) -> Result<TickerList, ScreeningError> {
    if !path.is_file() {
        return Err(ScreeningError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let (header, rows) = if is_csv(path) {
        read_csv(path)?
    } else {
        read_workbook(path)?
    };

    let list = build_ticker_list(path, &header, rows)?.with_benchmark();
    info!("📋 Loaded {} stocks for screening", list.len());
    Ok(list)
}

/// Strip the export's leading marker character from a code
pub fn normalize_code(raw: &str) -> String {
    raw.trim().chars().skip(1).collect()
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

type Table = (Vec<String>, Vec<Vec<String>>);

fn read_workbook(path: &Path) -> Result<Table, ScreeningError> {
    let spreadsheet_error = |reason: String| ScreeningError::Spreadsheet {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_error("workbook has no worksheets".to_string()))?
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| spreadsheet_error("worksheet is empty".to_string()))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    let code_idx = column_index(path, &header, CODE_COLUMN)?;

    let mut table = Vec::new();
    for (line, row) in rows.enumerate() {
        // A numeric cell has lost its leading zeros and prefix
        match row.get(code_idx) {
            Some(Data::String(_)) | Some(Data::Empty) | None => {}
            Some(other) => {
                warn!("⚠️ Skipping row {}: stock code {} is not text", line + 2, other);
                continue;
            }
        }
        table.push(row.iter().map(|cell| cell.to_string()).collect());
    }

    Ok((header, table))
}

fn read_csv(path: &Path) -> Result<Table, ScreeningError> {
    let spreadsheet_error = |e: csv::Error| ScreeningError::Spreadsheet {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::Reader::from_path(path).map_err(spreadsheet_error)?;
    let header = reader
        .headers()
        .map_err(spreadsheet_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(spreadsheet_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok((header, rows))
}

fn column_index(path: &Path, header: &[String], column: &str) -> Result<usize, ScreeningError> {
    header
        .iter()
        .position(|h| h.trim().trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| ScreeningError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
}

/// Pair up the code and name columns in row order
fn build_ticker_list(
    path: &Path,
    header: &[String],
    rows: Vec<Vec<String>>,
) -> Result<TickerList, ScreeningError> {
    let code_idx = column_index(path, header, CODE_COLUMN)?;
    let name_idx = column_index(path, header, NAME_COLUMN)?;

    let mut list = TickerList::new();
    for (line, row) in rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");

        let code = normalize_code(cell(code_idx));
        if code.is_empty() {
            // +2: one for the header row, one for 1-based numbering
            warn!("⚠️ Skipping row {}: empty stock code", line + 2);
            continue;
        }
        list.push(code, cell(name_idx));
    }

    Ok(list)
}
