//! Ticker export loading

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::test_data::write_ticker_csv;
use stock_screener::error::ScreeningError;
use stock_screener::models::{BENCHMARK_CODE, BENCHMARK_NAME};
use stock_screener::ticker_source::load_ticker_list;

#[test]
fn test_benchmark_is_appended_to_both_columns() {
    let dir = tempfile::tempdir().unwrap();
    write_ticker_csv(dir.path(), "tickers.csv", &[("A0001", "CKH"), ("A0005", "HSBC")]);

    let list = load_ticker_list(&dir.path().join("tickers.csv")).unwrap();

    assert_eq!(list.codes(), ["0001", "0005", BENCHMARK_CODE]);
    assert_eq!(list.names(), ["CKH", "HSBC", BENCHMARK_NAME]);
    assert_eq!(list.codes().len(), list.names().len());
}

#[test]
fn test_xlsx_export_is_read_from_first_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AASTOCKS_Export_2025-7-13.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in ["序號", "代號", "名稱", "現價"].iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    for (i, (code, name, price)) in [("00001.HK", "CKH", 40.5), ("00700.HK", "TENCENT", 512.0)]
        .iter()
        .enumerate()
    {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, row as f64).unwrap();
        sheet.write_string(row, 1, *code).unwrap();
        sheet.write_string(row, 2, *name).unwrap();
        sheet.write_number(row, 3, *price).unwrap();
    }
    workbook.save(&path).unwrap();

    let list = load_ticker_list(&path).unwrap();

    assert_eq!(list.codes(), ["0001.HK", "0700.HK", BENCHMARK_CODE]);
    assert_eq!(list.names(), ["CKH", "TENCENT", BENCHMARK_NAME]);
}

#[test]
fn test_empty_export_still_screens_benchmark() {
    let dir = tempfile::tempdir().unwrap();
    write_ticker_csv(dir.path(), "tickers.csv", &[]);

    let list = load_ticker_list(&dir.path().join("tickers.csv")).unwrap();

    assert_eq!(list.codes(), [BENCHMARK_CODE]);
}

#[test]
fn test_missing_file_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AASTOCKS_Export.xlsx");

    let err = load_ticker_list(&path).unwrap_err();

    assert_matches!(err, ScreeningError::InputNotFound { path: ref p } if p == &path);
}

#[test]
fn test_missing_name_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickers.csv");
    std::fs::write(&path, "代號,現價\nA0001,40.0\n").unwrap();

    let err = load_ticker_list(&path).unwrap_err();

    assert_matches!(err, ScreeningError::MissingColumn { ref column, .. } if column == "名稱");
}
