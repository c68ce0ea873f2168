//! Full screening run with mocked market data and messaging

use assert_matches::assert_matches;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::logging::{init_test_logging, log_test_step};
use crate::common::test_config;
use crate::common::test_data::{chart_json, chart_not_found_json, linear_closes, write_ticker_csv};
use crate::common::TEST_TOKEN;
use stock_screener::api::{TelegramClient, YahooClient};
use stock_screener::error::ScreeningError;
use stock_screener::models::Config;
use stock_screener::report::excel::HEADERS;
use stock_screener::screening::run_pipeline;

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
}

async fn mount_chart(server: &MockServer, symbol_path: &str, closes: &[f64]) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", symbol_path)))
        .respond_with(ResponseTemplate::new(200).set_body_string(chart_json(closes)))
        .expect(1)
        .mount(server)
        .await;
}

fn bot_method_ok(bot_method: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/{}", TEST_TOKEN, bot_method)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true, "result": {} })))
}

async fn run(config: &Config) -> Result<stock_screener::screening::ScreeningSummary, ScreeningError> {
    let provider = Arc::new(YahooClient::with_base_url(config.yahoo_base_url.clone()).unwrap());
    let notifier = TelegramClient::new(config).unwrap();
    run_pipeline(config, provider, &notifier, run_date()).await
}

#[tokio::test]
async fn test_screening_run_ranks_saves_and_delivers() {
    init_test_logging();
    log_test_step("Full screening run against mock servers");

    let yahoo = MockServer::start().await;
    let telegram = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_ticker_csv(dir.path(), "tickers.csv", &[("00001.HK", "CKH"), ("00005.HK", "HSBC")]);

    // r1 = 0.8, r5 = 4.3, r20 = 20.0
    mount_chart(&yahoo, "0001.HK", &linear_closes(100.0, 1.0, 21)).await;
    // r1 = 0.0, r5 = 0.2, r20 = 1.0
    mount_chart(&yahoo, "%5EHSI", &linear_closes(20_000.0, 10.0, 21)).await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/0005.HK"))
        .respond_with(ResponseTemplate::new(404).set_body_string(chart_not_found_json()))
        .expect(1)
        .mount(&yahoo)
        .await;

    bot_method_ok("sendDocument")
        .expect(1)
        .mount(&telegram)
        .await;
    // Chart rendering depends on system fonts, so the photo may be skipped
    bot_method_ok("sendPhoto")
        .expect(0..=1)
        .mount(&telegram)
        .await;

    let config = test_config(dir.path(), &yahoo.uri(), &telegram.uri());
    let summary = run(&config).await.unwrap();

    assert_eq!(summary.tickers, 3);
    assert_eq!((summary.fetched, summary.failed), (2, 1));

    let ranked: Vec<(&str, (f64, f64, f64))> = summary
        .table
        .rows()
        .iter()
        .map(|r| (r.code.as_str(), r.sort_key()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("0001.HK", (0.8, 4.3, 20.0)),
            ("^HSI", (0.0, 0.2, 1.0)),
            ("0005.HK", (0.0, 0.0, 0.0)),
        ]
    );

    let spreadsheet = summary.artifacts.spreadsheet.clone().unwrap();
    assert_eq!(spreadsheet, dir.path().join("output").join("df_result_14072025.xlsx"));
    let mut workbook = open_workbook_auto(&spreadsheet).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(header, HEADERS);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3][1], Data::String("HSBC".to_string()));

    assert!(summary.delivery.document_sent);
    assert_eq!(summary.delivery.photo_sent, summary.artifacts.chart.is_some());
}

#[tokio::test]
async fn test_failed_delivery_does_not_fail_the_run() {
    let yahoo = MockServer::start().await;
    let telegram = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    write_ticker_csv(dir.path(), "tickers.csv", &[("00001.HK", "CKH")]);

    mount_chart(&yahoo, "0001.HK", &linear_closes(100.0, 1.0, 21)).await;
    mount_chart(&yahoo, "%5EHSI", &linear_closes(20_000.0, 10.0, 21)).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "description": "Bad Request: chat not found"
        })))
        .mount(&telegram)
        .await;

    let config = test_config(dir.path(), &yahoo.uri(), &telegram.uri());
    let summary = run(&config).await.unwrap();

    assert!(summary.artifacts.spreadsheet.is_some());
    assert!(!summary.delivery.document_sent);
    assert!(!summary.delivery.photo_sent);
}

#[tokio::test]
async fn test_missing_token_aborts_before_any_download() {
    let yahoo = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&yahoo)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_ticker_csv(dir.path(), "tickers.csv", &[("00001.HK", "CKH")]);

    let mut config = test_config(dir.path(), &yahoo.uri(), "http://127.0.0.1:9");
    config.telegram_token = None;

    let provider = Arc::new(YahooClient::with_base_url(Url::parse(&yahoo.uri()).unwrap()).unwrap());
    let notifier = {
        let mut with_token = config.clone();
        with_token.telegram_token = Some(TEST_TOKEN.to_string());
        TelegramClient::new(&with_token).unwrap()
    };

    let err = run_pipeline(&config, provider, &notifier, run_date()).await.unwrap_err();

    assert_matches!(err, ScreeningError::MissingCredentials(ref missing) if missing == &["TELEGRAM_TOKEN"]);
    assert!(yahoo.received_requests().await.unwrap().is_empty());
    assert!(!dir.path().join("output").exists());
}
