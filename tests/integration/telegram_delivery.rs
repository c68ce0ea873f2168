//! Bot API uploads against a mock server

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{test_config, TEST_CHAT_ID, TEST_TOKEN};
use stock_screener::api::{ReportNotifier, TelegramClient};

#[tokio::test]
async fn test_send_document_uploads_multipart_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendDocument", TEST_TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true, "result": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("df_result_14072025.xlsx");
    std::fs::write(&file, b"workbook bytes").unwrap();

    let config = test_config(dir.path(), "http://127.0.0.1:9", &server.uri());
    TelegramClient::new(&config).unwrap().send_document(&file).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"chat_id\""));
    assert!(body.contains(TEST_CHAT_ID));
    assert!(body.contains("filename=\"df_result_14072025.xlsx\""));
    assert!(body.contains("workbook bytes"));
}

#[tokio::test]
async fn test_rejected_upload_reports_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendPhoto", TEST_TOKEN)))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chart1.png");
    std::fs::write(&file, b"png").unwrap();

    let config = test_config(dir.path(), "http://127.0.0.1:9", &server.uri());
    let err = TelegramClient::new(&config).unwrap().send_photo(&file).await.unwrap_err();

    assert!(err.to_string().contains("chat not found"), "{}", err);
    assert!(!err.to_string().contains(TEST_TOKEN));
}
